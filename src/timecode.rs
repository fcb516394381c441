//! Generation time derivation.
//!
//! 42 stamps each truth record with `dyn_time`, seconds elapsed since the
//! J2000 reference epoch (2000-01-01T12:00:00 UTC). The host pipeline wants
//! absolute time as integer milliseconds since the Unix epoch.
use hifitime::Epoch;

/// Milliseconds from the Unix epoch to J2000.
pub const J2000_UNIX_MILLIS: i64 = 946_728_000_000;

/// Convert `dyn_time` seconds since J2000 to milliseconds since the Unix
/// epoch.
///
/// The multiplication is done in double precision and the result is floored,
/// so negative offsets round toward earlier times. Flooring keeps successive
/// timestamps monotonic across the epoch rather than collapsing the two
/// milliseconds around it the way truncation would.
#[must_use]
pub fn generation_millis(dyn_time: f64) -> i64 {
    J2000_UNIX_MILLIS + (dyn_time * 1000.0).floor() as i64
}

/// Convert `dyn_time` seconds since J2000 to a [`hifitime::Epoch`], at
/// millisecond resolution.
#[must_use]
pub fn generation_epoch(dyn_time: f64) -> Epoch {
    Epoch::from_unix_milliseconds(generation_millis(dyn_time) as f64)
}
