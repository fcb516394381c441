//! Truth telemetry record decoding.
//!
//! A truth record is the fixed-layout state dump written once per sim step by
//! the 42 dynamics simulator: 34 little-endian doubles followed by a single
//! int32 eclipse flag, 276 bytes total, no padding.
use std::io::{Read, Result as IOResult};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fixed wire size of one truth record: 34 doubles and 1 int32.
pub const RECORD_LEN: usize = 276;

/// A fully decoded truth record.
///
/// Fields appear in wire order. Values are decoded as-is; no plausibility
/// checking is done on any field, so e.g. a non-unit `qn` decodes fine.
///
/// # Example
/// ```
/// use truth42::{TruthRecord, RECORD_LEN};
///
/// let buf = vec![0u8; RECORD_LEN];
/// let record = TruthRecord::decode(&buf).unwrap();
/// assert_eq!(record.dyn_time, 0.0);
/// assert_eq!(record.eclipse, 0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TruthRecord {
    /// Sim time in seconds since the J2000 epoch.
    pub dyn_time: f64,
    /// Position in the inertial frame, meters.
    pub pos_n: [f64; 3],
    /// Sun unit vector in the body frame.
    pub svb: [f64; 3],
    /// Magnetic field vector in the body frame, Tesla.
    pub bvb: [f64; 3],
    /// Angular momentum in the body frame.
    pub hvb: [f64; 3],
    /// Angular rate relative to the inertial frame, body coordinates.
    pub wn: [f64; 3],
    /// Attitude quaternion, inertial to body.
    pub qn: [f64; 4],
    /// Spacecraft mass, kg.
    pub mass: f64,
    /// Center of mass in body coordinates.
    pub cm: [f64; 3],
    /// Inertia tensor, row-major.
    pub inertia: [[f64; 3]; 3],
    /// Non-zero while the spacecraft is in eclipse.
    pub eclipse: i32,
    /// Local atmospheric density.
    pub atmo_density: f64,
}

impl TruthRecord {
    /// Decode a single record from `buf`.
    ///
    /// Only the first [`RECORD_LEN`] bytes are consumed; trailing bytes are
    /// ignored. Decoding the same bytes twice produces identical records.
    ///
    /// # Errors
    /// [`Error::ShortBuffer`] if `buf` holds fewer than [`RECORD_LEN`] bytes.
    pub fn decode(buf: &[u8]) -> Result<TruthRecord> {
        if buf.len() < RECORD_LEN {
            return Err(Error::ShortBuffer {
                actual: buf.len(),
                expected: RECORD_LEN,
            });
        }
        let mut fields = Fields { buf, pos: 0 };
        let record = TruthRecord {
            dyn_time: fields.f64(),
            pos_n: fields.vec3(),
            svb: fields.vec3(),
            bvb: fields.vec3(),
            hvb: fields.vec3(),
            wn: fields.vec3(),
            qn: [fields.f64(), fields.f64(), fields.f64(), fields.f64()],
            mass: fields.f64(),
            cm: fields.vec3(),
            inertia: [fields.vec3(), fields.vec3(), fields.vec3()],
            eclipse: fields.i32(),
            atmo_density: fields.f64(),
        };
        debug_assert_eq!(fields.pos, RECORD_LEN);
        Ok(record)
    }

    /// Read a single record.
    ///
    /// # Errors
    /// [`Error::Io`] for any ``std::io::Error`` reading, including
    /// ``UnexpectedEof`` when fewer than [`RECORD_LEN`] bytes remain.
    pub fn read<R>(mut r: R) -> Result<TruthRecord>
    where
        R: Read + Send,
    {
        let mut buf = [0u8; RECORD_LEN];
        r.read_exact(&mut buf)?;
        Self::decode(&buf)
    }

    /// Generation time of this record in milliseconds since the Unix epoch,
    /// derived from [`dyn_time`](Self::dyn_time). See
    /// [`timecode::generation_millis`](crate::timecode::generation_millis).
    #[must_use]
    pub fn generation_time(&self) -> i64 {
        crate::timecode::generation_millis(self.dyn_time)
    }

    /// Generation time of this record as a [`hifitime::Epoch`].
    #[must_use]
    pub fn generation_epoch(&self) -> hifitime::Epoch {
        crate::timecode::generation_epoch(self.dyn_time)
    }
}

/// Little-endian field cursor over a length-checked buffer.
struct Fields<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Fields<'_> {
    fn f64(&mut self) -> f64 {
        // caller has already verified there are RECORD_LEN bytes
        let v = f64::from_le_bytes(self.buf[self.pos..self.pos + 8].try_into().unwrap());
        self.pos += 8;
        v
    }

    fn i32(&mut self) -> i32 {
        let v = i32::from_le_bytes(self.buf[self.pos..self.pos + 4].try_into().unwrap());
        self.pos += 4;
        v
    }

    fn vec3(&mut self) -> [f64; 3] {
        [self.f64(), self.f64(), self.f64()]
    }
}

/// Iterator of records read from a byte stream of back-to-back truth records.
pub struct RecordReaderIter<R>
where
    R: Read + Send,
{
    reader: R,
}

impl<R> Iterator for RecordReaderIter<R>
where
    R: Read + Send,
{
    type Item = IOResult<TruthRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; RECORD_LEN];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => {
                // decode cannot fail on a full buffer
                Some(Ok(TruthRecord::decode(&buf).unwrap()))
            }
            Err(err) => {
                if err.kind() == std::io::ErrorKind::UnexpectedEof {
                    return None;
                }
                Some(Err(err))
            }
        }
    }
}

/// Return an iterator providing [TruthRecord]s read from a stream of
/// back-to-back records, stopping at EOF.
///
/// # Examples
/// ```
/// use truth42::{record::read_records, RECORD_LEN};
///
/// let dat = vec![0u8; RECORD_LEN * 2];
/// let r = std::io::BufReader::new(&dat[..]);
/// assert_eq!(read_records(r).count(), 2);
/// ```
pub fn read_records<R>(reader: R) -> impl Iterator<Item = IOResult<TruthRecord>> + Send
where
    R: Read + Send,
{
    RecordReaderIter { reader }
}
