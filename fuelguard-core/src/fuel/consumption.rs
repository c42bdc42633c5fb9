//! Fuel Consumption Rates
//!
//! Consumption is derived from the change in fuel level between the
//! previous and the current position of a device:
//!
//! ```text
//! per hour = |current - previous| / (elapsed_ms / 3_600_000)
//! per km   = |current - previous| / (odometer delta m / 1000)
//! ```
//!
//! Rates are magnitudes. Refuelling and burning fuel both produce a
//! positive number.
//!
//! ## Degenerate Intervals
//!
//! ```text
//! current level <= 0          → 0   (empty, untrusted or no reading)
//! no previous position        → 0   (first reading of a device)
//! elapsed time == 0           → 0   (same device timestamp)
//! elapsed time < 0            → 0   (out-of-order reading, saturated)
//! odometer delta <= 0         → 0   (stationary or odometer reset)
//! non-finite result           → 0
//! ```
//!
//! None of these are errors: a single odd interval must not stop the
//! position from being enriched.

use crate::{
    constants::{fuel::METERS_PER_KM, time::MS_PER_HOUR},
    position::{AttributeKey, Position},
    time::elapsed_ms,
};

/// Liters per hour between two levels `elapsed_ms` apart
pub fn rate_by_time(current_level: f64, previous_level: f64, elapsed_ms: u64) -> f64 {
    if current_level.is_nan() || current_level <= 0.0 || elapsed_ms == 0 {
        return 0.0;
    }

    let hours = elapsed_ms as f64 / MS_PER_HOUR as f64;
    finite_or_zero(libm::fabs(current_level - previous_level) / hours)
}

/// Liters per kilometer between two levels `distance_m` apart
pub fn rate_by_distance(current_level: f64, previous_level: f64, distance_m: f64) -> f64 {
    if current_level.is_nan() || current_level <= 0.0 {
        return 0.0;
    }
    if distance_m.is_nan() || distance_m <= 0.0 {
        return 0.0;
    }

    let km = distance_m / METERS_PER_KM;
    finite_or_zero(libm::fabs(current_level - previous_level) / km)
}

/// Per-hour consumption for `current_level`, measured on `current`
///
/// The previous level is the one stored on `previous`.
pub fn consumption_per_hour(previous: Option<&Position>, current: &Position, current_level: f64) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };

    rate_by_time(
        current_level,
        previous.get(&AttributeKey::FuelLevel),
        elapsed_ms(previous.device_time, current.device_time),
    )
}

/// Per-kilometer consumption for `current_level`, measured on `current`
pub fn consumption_per_km(previous: Option<&Position>, current: &Position, current_level: f64) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };

    rate_by_distance(
        current_level,
        previous.get(&AttributeKey::FuelLevel),
        current.odometer_m - previous.odometer_m,
    )
}

fn finite_or_zero(rate: f64) -> f64 {
    if rate.is_finite() { rate } else { 0.0 }
}
