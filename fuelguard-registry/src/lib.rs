//! Fleet Configuration for FuelGuard
//!
//! ## Overview
//!
//! The fuel stage needs four read-only lookups: devices, fuel sensors,
//! reading types and each device's last known position. This crate provides
//! one thread-safe store that serves all four, loaded from a JSON fleet
//! description:
//!
//! ```json
//! {
//!   "devices": [
//!     { "id": 1, "fuel_sensor_id": 10, "fuel_slope": 0.025, "fuel_constant": 0.0 }
//!   ],
//!   "fuel_sensors": [
//!     { "id": 10, "calibrated": true, "lower_bound": 2.0, "upper_bound": 80.0,
//!       "fuel_level_port": "adc1" },
//!     { "id": 11, "reading_type_id": 3, "upper_bound": 400.0,
//!       "fuel_level_port": "fuel1", "fuel_rate_port": "fuelRate",
//!       "fuel_consumed_port": "fuelUsed" }
//!   ],
//!   "reading_types": [
//!     { "id": 3, "conversion_multiplier": 0.5 }
//!   ]
//! }
//! ```
//!
//! ## Consistency Rules
//!
//! - Ids are unique per entity kind
//! - A non-calibrated sensor must reference a configured reading type
//! - A calibrated sensor's lower bound must not exceed its upper bound
//! - A device may reference a sensor that is not configured; the fuel stage
//!   then writes the zeroed "no sensor" state
//!
//! ## Usage
//!
//! ```rust
//! use fuelguard_core::{FuelLevelStage, Position, PositionStage};
//! use fuelguard_registry::FleetRegistry;
//!
//! let registry = FleetRegistry::from_json(r#"{
//!     "devices": [{ "id": 1, "fuel_sensor_id": 10, "fuel_slope": 0.5 }],
//!     "fuel_sensors": [{ "id": 10, "calibrated": true, "upper_bound": 60.0,
//!                        "fuel_level_port": "fuel1" }]
//! }"#)?;
//!
//! let stage = FuelLevelStage::new(&registry);
//! let mut position = Position::builder(1).time(1_000).port("fuel1", 80.0).build().unwrap();
//! stage.process(&mut position).unwrap();
//! registry.record_position(&position)?;
//!
//! assert_eq!(position.fuel_level(), Some(40.0));
//! # Ok::<(), fuelguard_registry::RegistryError>(())
//! ```

use fuelguard_core::{
    config::{ReadingTypeId, SensorId},
    Device, FuelSensor, ReadingType,
};
use serde::{Deserialize, Serialize};

pub mod registry;

pub use registry::FleetRegistry;

/// Fleet description as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Tracked devices
    #[serde(default)]
    pub devices: Vec<Device>,

    /// Fuel sensor definitions
    #[serde(default)]
    pub fuel_sensors: Vec<FuelSensor>,

    /// Raw unit conversions
    #[serde(default)]
    pub reading_types: Vec<ReadingType>,
}

/// Registry-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum RegistryError {
    #[error("Failed to read fleet config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fleet config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("Fuel sensor {sensor} references unknown reading type {reading_type}")]
    UnknownReadingType {
        sensor: SensorId,
        reading_type: ReadingTypeId,
    },

    #[error("Fuel sensor {sensor} has inverted bounds [{lower}, {upper}]")]
    InvertedBounds { sensor: SensorId, lower: f64, upper: f64 },

    #[error("Registry lock poisoned")]
    LockPoisoned,
}
