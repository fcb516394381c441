#![doc = include_str!("../README.md")]

mod error;

pub mod preprocessor;
pub mod record;
pub mod timecode;

pub use error::{Error, Result};
pub use record::{TruthRecord, RECORD_LEN};
