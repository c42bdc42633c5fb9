//! Position Processing Pipeline Traits
//!
//! ```text
//! Decoder → [Identity] → [Stage 1] → ... → [Fuel] → ... → Storage
//! ```
//!
//! The pipeline calls every stage once per incoming position, after the
//! device has been resolved. Stages enrich the position in place.

use crate::{errors::EnrichResult, position::Position};

/// Trait for position pipeline stages
///
/// ## Implementation Guidelines
///
/// 1. **Stateless when possible**: `process` takes `&self` so one stage can
///    serve many devices at once
/// 2. **Bounded processing time**: no I/O or blocking inside a stage
/// 3. **Pass through what you can't handle**: leave the position untouched
///    rather than failing it
///
/// ## Example: Odometer Stage
///
/// ```rust
/// use fuelguard_core::{EnrichResult, Position, PositionStage};
///
/// struct KilometerOdometer;
///
/// impl PositionStage for KilometerOdometer {
///     fn process(&self, position: &mut Position) -> EnrichResult<()> {
///         // Decoder reported kilometers, pipeline wants meters
///         position.odometer_m *= 1000.0;
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "KilometerOdometer"
///     }
/// }
/// ```
pub trait PositionStage: Send + Sync {
    /// Enrich a position in place
    ///
    /// Return an error only when the position cannot hold the result.
    fn process(&self, position: &mut Position) -> EnrichResult<()>;

    /// Stage name for logs
    fn name(&self) -> &'static str;

    /// Whether the stage wants this position at all
    ///
    /// Default implementation returns `true`.
    fn can_handle(&self, _position: &Position) -> bool {
        true
    }
}
