//! Core Traits for FuelGuard
//!
//! ## Module Organization
//!
//! - [`lookup`] - read-only access to device, sensor, reading-type and
//!   last-position stores
//! - [`pipeline`] - the stage interface the surrounding pipeline drives
//!
//! Stores are passed into stages explicitly instead of being reached through
//! process-wide managers, so a stage can be tested against a fixture and
//! run concurrently for different devices.

pub mod lookup;
pub mod pipeline;

pub use lookup::{DeviceLookup, FleetLookup, FuelSensorLookup, PositionLookup, ReadingTypeLookup};
pub use pipeline::PositionStage;
