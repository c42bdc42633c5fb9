//! Fuel enrichment engine for FuelGuard
//!
//! Derives fuel level and fuel consumption from the raw sensor readings a
//! tracker embeds in each position, using per-device calibration and
//! per-sensor configuration.
//!
//! Key constraints:
//! - Pure and synchronous: no I/O, no state between positions
//! - No heap allocation in the hot path
//! - Numeric edge cases resolve to defined values, never errors
//!
//! ```no_run
//! use fuelguard_core::{EnrichResult, FleetLookup, FuelLevelStage, Position, PositionStage};
//!
//! fn on_position<L: FleetLookup + Send + Sync>(
//!     stage: &FuelLevelStage<L>,
//!     mut position: Position,
//! ) -> EnrichResult<Position> {
//!     // Enrich the position in place
//!     stage.process(&mut position)?;
//!     Ok(position)
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod fuel;
pub mod pipeline;
pub mod position;
pub mod time;
pub mod traits;

// Public API
pub use config::{Device, FuelSensor, ReadingType};
pub use errors::{EnrichError, EnrichResult};
pub use fuel::{enrich, FuelReading, Outcome};
pub use pipeline::FuelLevelStage;
pub use position::{AttributeKey, Position, PositionBuilder};
pub use traits::{FleetLookup, PositionStage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
