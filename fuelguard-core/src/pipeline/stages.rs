//! Fuel level stage
//!
//! Resolves the device, its fuel sensor, the sensor's reading type and the
//! device's last known position, then runs the fuel model on the incoming
//! position.

use crate::{
    errors::EnrichResult,
    fuel::{enrich, Outcome},
    macros::{log_debug, log_warn},
    position::{AttributeKey, Position},
    traits::{FleetLookup, PositionStage},
};

// ============================================================================
// FuelLevelStage - derives fuel level and consumption
// ============================================================================

/// Stage that derives fuel metrics from raw sensor ports
pub struct FuelLevelStage<L> {
    lookup: L,
}

impl<L: FleetLookup> FuelLevelStage<L> {
    /// Create a stage resolving configuration through `lookup`
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Lookups the stage resolves through
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Enrich a position and report which branch ran
    ///
    /// Positions that already carry a fuel level, belong to an unknown
    /// device, or whose device has no sensor reference pass through.
    pub fn handle(&self, position: &mut Position) -> Outcome {
        if position.contains(&AttributeKey::FuelLevel) {
            return Outcome::Skipped;
        }

        let Some(device) = self.lookup.device(position.device_id) else {
            return Outcome::Skipped;
        };
        let Some(sensor_id) = device.fuel_sensor() else {
            return Outcome::Skipped;
        };

        let previous = self.lookup.last_position(device.id);
        let sensor = self.lookup.fuel_sensor(sensor_id);
        // Reading types only matter for converted sensors
        let reading_type = sensor
            .as_ref()
            .filter(|s| !s.calibrated)
            .and_then(|s| self.lookup.reading_type(s.reading_type_id));

        let outcome = enrich(
            previous.as_ref(),
            position,
            &device,
            sensor.as_ref(),
            reading_type.as_ref(),
        );

        if outcome == Outcome::AttributesFull {
            log_warn!(
                "Position of device {} is full ({} attributes), fuel not derived",
                device.id,
                position.attribute_count()
            );
            return outcome;
        }

        log_debug!(
            "Device {} fuel level {} ({:?})",
            device.id,
            position.get(&AttributeKey::FuelLevel),
            outcome
        );

        outcome
    }
}

impl<L: FleetLookup + Send + Sync> PositionStage for FuelLevelStage<L> {
    fn process(&self, position: &mut Position) -> EnrichResult<()> {
        self.handle(position);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FuelLevelStage"
    }

    fn can_handle(&self, position: &Position) -> bool {
        !position.contains(&AttributeKey::FuelLevel)
    }
}
