//! Device time handling
//!
//! Device timestamps are milliseconds since the Unix epoch as reported by the
//! tracker itself (not the server receive time).

/// Timestamp in milliseconds since epoch
pub type Timestamp = u64;

/// Milliseconds elapsed from `earlier` to `later`.
///
/// Out-of-order readings (later < earlier) saturate to zero rather than
/// wrapping, which the rate code then treats as "no elapsed time".
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}
