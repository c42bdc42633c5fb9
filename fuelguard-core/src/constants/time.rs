//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
