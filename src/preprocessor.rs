//! Per-packet preprocessing for a host telemetry pipeline.
//!
//! The host invokes [`Preprocessor::process`] once per inbound packet. The
//! truth preprocessor decodes the payload as a [`TruthRecord`] and stamps the
//! packet with the generation time derived from the record's sim time.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::record::{TruthRecord, RECORD_LEN};

/// A raw telemetry packet as exchanged with the host pipeline.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TmPacket {
    /// Raw packet payload.
    pub data: Vec<u8>,
    /// Generation time in milliseconds since the Unix epoch, set once a
    /// preprocessor has derived it.
    pub generation_time: Option<i64>,
}

impl TmPacket {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        TmPacket {
            data,
            generation_time: None,
        }
    }
}

/// Options recognized by a preprocessor, keyed by name. May be empty.
pub type Config = HashMap<String, Value>;

/// A single preprocessing step in the host pipeline.
pub trait Preprocessor {
    /// Process one inbound packet, returning it ready for downstream routing,
    /// or `None` to tell the host to drop it.
    fn process(&self, packet: TmPacket) -> Option<TmPacket>;
}

/// Stamps packets containing 42 truth records with their generation time.
///
/// Stateless; a single instance may be shared across threads.
///
/// # Example
/// ```
/// use truth42::preprocessor::{Config, Preprocessor, TmPacket, TruthPreprocessor};
/// use truth42::RECORD_LEN;
///
/// let pp = TruthPreprocessor::new(Config::default());
/// let packet = pp.process(TmPacket::new(vec![0u8; RECORD_LEN])).unwrap();
/// assert_eq!(packet.generation_time, Some(946_728_000_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TruthPreprocessor {
    /// Construction-time options. None are recognized yet; kept so hosts can
    /// configure this preprocessor the same way as any other.
    pub config: Config,
}

impl TruthPreprocessor {
    #[must_use]
    pub fn new(config: Config) -> Self {
        TruthPreprocessor { config }
    }
}

impl Preprocessor for TruthPreprocessor {
    fn process(&self, mut packet: TmPacket) -> Option<TmPacket> {
        let record = match TruthRecord::decode(&packet.data) {
            Ok(record) => record,
            Err(_) => {
                warn!(
                    actual = packet.data.len(),
                    expected = RECORD_LEN,
                    "short truth packet, dropping"
                );
                return None;
            }
        };
        packet.generation_time = Some(record.generation_time());
        Some(packet)
    }
}
