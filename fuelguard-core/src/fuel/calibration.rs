//! Fuel Level Calibration and Bounds Policy
//!
//! ## Calibration Modes
//!
//! A fuel sensor produces a raw value (ADC counts, CAN units, percent of
//! tank) under a decoder port. Two numeric models turn it into liters:
//!
//! ```text
//! Calibrated:  level = slope * raw + constant     (per-device fit)
//!              → bounded to [lower, upper]
//! Converted:   level = raw * multiplier           (per-reading-type)
//!              → stored as-is
//! ```
//!
//! The mode is chosen by the sensor's `calibrated` flag and modelled as a
//! tagged variant so both paths stay exhaustively matchable.
//!
//! ## Bounds Policy
//!
//! ```text
//!   level < lower   →  Untrusted (-1)   probe disconnected / noise floor
//!   level > upper   →  Saturated(upper) never report more than the tank holds
//!   otherwise       →  Valid(level)
//! ```
//!
//! Bounds are applied exactly as configured. With `lower > upper` no level
//! is valid: it is either untrusted or saturated to `upper`.
//!
//! The `-1` sentinel is distinct from the `0` written when a device's sensor
//! configuration is missing (`Empty`). Consumers must not read `-1` as a
//! low tank.

use crate::{
    config::{Device, FuelSensor, ReadingType},
    constants::fuel::{EMPTY_FUEL_LEVEL, IDENTITY_MULTIPLIER, UNTRUSTED_FUEL_LEVEL},
};

/// Physical bounds of a fuel sensor in liters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelBounds {
    lower: f64,
    upper: f64,
}

impl FuelBounds {
    /// Create bounds in the given order
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Bounds configured on a sensor
    pub fn of(sensor: &FuelSensor) -> Self {
        Self::new(sensor.lower_bound, sensor.upper_bound)
    }

    /// Lowest trusted level
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Tank capacity
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether some level can fall within the bounds
    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }
}

/// Classified fuel level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelReading {
    /// No sensor configuration available, stored as `0`
    Empty,
    /// Reading below the lower bound, stored as `-1`
    Untrusted,
    /// Reading within bounds
    Valid(f64),
    /// Reading above the upper bound, stored as the upper bound
    Saturated(f64),
}

impl FuelReading {
    /// Value written to the position's fuel level attribute
    pub fn value(&self) -> f64 {
        match self {
            FuelReading::Empty => EMPTY_FUEL_LEVEL,
            FuelReading::Untrusted => UNTRUSTED_FUEL_LEVEL,
            FuelReading::Valid(level) | FuelReading::Saturated(level) => *level,
        }
    }

    /// Whether the value can be used as a real tank level
    pub fn is_trusted(&self) -> bool {
        matches!(self, FuelReading::Valid(_) | FuelReading::Saturated(_))
    }
}

/// How raw sensor values become liters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationMode {
    /// Per-device linear fit, bounded by the sensor's physical range
    Calibrated {
        /// Liters per raw unit
        slope: f64,
        /// Liters offset
        constant: f64,
        /// Sensor bounds
        bounds: FuelBounds,
    },
    /// Reading-type multiplier, no bounds applied
    Converted {
        /// Raw units to liters (or liters/hour)
        multiplier: f64,
    },
}

impl CalibrationMode {
    /// Select the mode for a sensor fitted to a device
    ///
    /// A converted sensor without a reading type keeps raw values unchanged.
    pub fn for_sensor(device: &Device, sensor: &FuelSensor, reading_type: Option<&ReadingType>) -> Self {
        if sensor.calibrated {
            CalibrationMode::Calibrated {
                slope: device.fuel_slope,
                constant: device.fuel_constant,
                bounds: FuelBounds::of(sensor),
            }
        } else {
            CalibrationMode::Converted {
                multiplier: reading_type
                    .map(|rt| rt.conversion_multiplier)
                    .unwrap_or(IDENTITY_MULTIPLIER),
            }
        }
    }
}

/// Apply a linear calibration to a raw reading
pub fn linear_calibration(raw: f64, slope: f64, constant: f64) -> f64 {
    slope * raw + constant
}

/// Classify a calibrated level against sensor bounds
pub fn bound_fuel_level(level: f64, bounds: FuelBounds) -> FuelReading {
    if !level.is_finite() || level < bounds.lower {
        FuelReading::Untrusted
    } else if level > bounds.upper {
        FuelReading::Saturated(bounds.upper)
    } else {
        FuelReading::Valid(level)
    }
}
