//! Constants for FuelGuard Core
//!
//! Numeric values used by the enrichment stage live here so that the
//! calibration and rate code reads without magic numbers.
//!
//! - **Fuel**: sentinels and unit conversions for fuel metrics
//! - **Time**: time unit conversions
//! - **Buffers**: fixed capacities for inline storage

/// Fuel sentinels and unit conversions.
pub mod fuel;

/// Time unit conversions.
pub mod time;

/// Fixed capacities for attribute maps and inline identifiers.
pub mod buffers;

pub use fuel::{EMPTY_FUEL_LEVEL, UNTRUSTED_FUEL_LEVEL, METERS_PER_KM, IDENTITY_MULTIPLIER};
pub use time::{MS_PER_SECOND, MS_PER_HOUR};
pub use buffers::{MAX_ATTRIBUTES, MAX_PORT_ID_LEN};
