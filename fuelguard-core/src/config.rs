//! Device, sensor and reading-type configuration
//!
//! These are read-only inputs to the fuel stage. They are normally loaded by
//! the registry crate from JSON, but the types themselves carry no storage
//! concerns.

use crate::position::{DeviceId, InlineString};

/// Fuel sensor identifier, `0` means "no sensor"
pub type SensorId = u64;

/// Reading type identifier
pub type ReadingTypeId = u64;

/// A tracked device and its linear fuel calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    /// Device identifier
    pub id: DeviceId,

    /// Attached fuel sensor, `0` when none is fitted
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_sensor_id: SensorId,

    /// Liters per raw unit, used only by calibrated sensors
    #[cfg_attr(feature = "serde", serde(default = "unit_slope"))]
    pub fuel_slope: f64,

    /// Liters offset, used only by calibrated sensors
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_constant: f64,
}

#[cfg(feature = "serde")]
fn unit_slope() -> f64 {
    1.0
}

impl Device {
    /// Device without a fuel sensor
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            fuel_sensor_id: 0,
            fuel_slope: 1.0,
            fuel_constant: 0.0,
        }
    }

    /// Attach a fuel sensor
    pub fn with_fuel_sensor(mut self, sensor_id: SensorId) -> Self {
        self.fuel_sensor_id = sensor_id;
        self
    }

    /// Set the linear calibration `level = slope * raw + constant`
    pub fn with_calibration(mut self, slope: f64, constant: f64) -> Self {
        self.fuel_slope = slope;
        self.fuel_constant = constant;
        self
    }

    /// Configured fuel sensor, if any
    pub fn fuel_sensor(&self) -> Option<SensorId> {
        (self.fuel_sensor_id > 0).then_some(self.fuel_sensor_id)
    }
}

/// Fuel sensor configuration
///
/// The port fields name the position attributes the decoder stored the raw
/// readings under.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelSensor {
    /// Sensor identifier
    pub id: SensorId,

    /// Reading type providing the raw-unit conversion
    #[cfg_attr(feature = "serde", serde(default))]
    pub reading_type_id: ReadingTypeId,

    /// Whether the device's slope/constant calibration applies
    #[cfg_attr(feature = "serde", serde(default))]
    pub calibrated: bool,

    /// Lowest physically meaningful level in liters
    #[cfg_attr(feature = "serde", serde(default))]
    pub lower_bound: f64,

    /// Tank capacity in liters
    pub upper_bound: f64,

    /// Port carrying the raw fuel level
    pub fuel_level_port: InlineString,

    /// Port carrying the raw fuel rate
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_rate_port: Option<InlineString>,

    /// Port carrying the fuel consumed counter
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_consumed_port: Option<InlineString>,
}

impl FuelSensor {
    /// Calibrated sensor reading its level from `level_port`
    pub fn calibrated(id: SensorId, level_port: InlineString, lower: f64, upper: f64) -> Self {
        Self {
            id,
            reading_type_id: 0,
            calibrated: true,
            lower_bound: lower,
            upper_bound: upper,
            fuel_level_port: level_port,
            fuel_rate_port: None,
            fuel_consumed_port: None,
        }
    }

    /// Sensor whose raw values are converted through a reading type
    pub fn converted(id: SensorId, reading_type_id: ReadingTypeId, level_port: InlineString) -> Self {
        Self {
            id,
            reading_type_id,
            calibrated: false,
            lower_bound: 0.0,
            upper_bound: f64::MAX,
            fuel_level_port: level_port,
            fuel_rate_port: None,
            fuel_consumed_port: None,
        }
    }

    /// Set the fuel rate port
    pub fn with_rate_port(mut self, port: InlineString) -> Self {
        self.fuel_rate_port = Some(port);
        self
    }

    /// Set the fuel consumed port
    pub fn with_consumed_port(mut self, port: InlineString) -> Self {
        self.fuel_consumed_port = Some(port);
        self
    }
}

/// Conversion from raw sensor units to liters (or liters per hour)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingType {
    /// Reading type identifier
    pub id: ReadingTypeId,

    /// Multiplier applied to raw port values
    pub conversion_multiplier: f64,
}

impl ReadingType {
    /// Create a reading type
    pub fn new(id: ReadingTypeId, conversion_multiplier: f64) -> Self {
        Self { id, conversion_multiplier }
    }
}
