//! Fuel Level Model
//!
//! ## Overview
//!
//! Trackers report fuel as raw sensor values: ADC counts from a float
//! sender, CAN bus units, or a consumed-liters counter. This module turns
//! those into the fuel attributes downstream consumers read:
//!
//! | Attribute              | Unit  | Written by                |
//! |------------------------|-------|---------------------------|
//! | `fuel`                 | L     | both branches, no-sensor  |
//! | `fuelConsumption`      | L/h   | both branches, no-sensor  |
//! | `fuelConsumptionPerKm` | L/km  | both branches             |
//! | `fuelUsed`             | raw   | converted, no-sensor      |
//!
//! ## Submodules
//!
//! - `calibration` - calibration modes and the bounds policy
//! - `consumption` - rate by time and rate by distance
//! - `enrich` - the per-position entry point
//!
//! ## Usage Example
//!
//! ```rust
//! use fuelguard_core::config::{Device, FuelSensor};
//! use fuelguard_core::fuel::{enrich, Outcome, FuelReading};
//! use fuelguard_core::position::{InlineString, Position};
//!
//! let device = Device::new(1).with_fuel_sensor(3).with_calibration(2.0, 1.0);
//! let sensor = FuelSensor::calibrated(3, InlineString::new("adc1").unwrap(), 0.0, 100.0);
//!
//! let mut position = Position::builder(1).time(1_000).port("adc1", 10.0).build()?;
//! let outcome = enrich(None, &mut position, &device, Some(&sensor), None);
//!
//! assert_eq!(outcome, Outcome::Calibrated(FuelReading::Valid(21.0)));
//! assert_eq!(position.fuel_level(), Some(21.0));
//! # Ok::<(), fuelguard_core::EnrichError>(())
//! ```

pub mod calibration;
pub mod consumption;
mod enrich;

pub use calibration::{
    bound_fuel_level, linear_calibration, CalibrationMode, FuelBounds, FuelReading,
};
pub use consumption::{consumption_per_hour, consumption_per_km, rate_by_distance, rate_by_time};
pub use enrich::{enrich, Outcome};
