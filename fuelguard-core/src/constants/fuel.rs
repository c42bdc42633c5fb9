//! Fuel Constants
//!
//! Sentinel values written into a position's fuel attributes and the unit
//! conversions used by the consumption rates.

// ===== SENTINELS =====

/// Fuel level stored when the device has a sensor reference but the sensor
/// configuration could not be resolved.
///
/// This is a "known empty" state, not a low reading.
pub const EMPTY_FUEL_LEVEL: f64 = 0.0;

/// Fuel level stored when the calibrated reading falls below the sensor's
/// lower physical bound.
///
/// Consumers must treat this as "untrusted", never as a valid low level.
/// Typical causes are a disconnected probe or readings inside the noise floor.
pub const UNTRUSTED_FUEL_LEVEL: f64 = -1.0;

// ===== CONVERSIONS =====

/// Meters per kilometer. Odometers report meters, per-km rates need km.
pub const METERS_PER_KM: f64 = 1000.0;

/// Multiplier applied when a non-calibrated sensor has no reading type.
pub const IDENTITY_MULTIPLIER: f64 = 1.0;
