//! Fuel enrichment of a single position
//!
//! `enrich` is the pure core of the fuel stage. It reads raw sensor ports
//! from the current position, applies the sensor's calibration mode and
//! writes the derived fuel attributes back into the same position.
//!
//! ```text
//! fuel level present?          ── yes ─→ Skipped (untouched)
//! device has sensor reference? ── no ──→ Skipped (untouched)
//! sensor configuration found?  ── no ──→ NoSensor: level/consumption/used = 0
//! calibrated?                  ── yes ─→ level = bound(slope*raw + constant)
//!                                        consumption = rate by time
//!                              ── no ──→ level = raw * multiplier
//!                                        consumption = raw rate * multiplier
//!                                        used = raw consumed
//! both sensor branches         ────────→ consumption per km = rate by distance
//! ```
//!
//! Fuel used is only written by the converted branch. Per-km consumption is
//! not written when the sensor configuration is missing.
//!
//! All values are computed before anything is stored. If the position's
//! attribute map cannot take every key the branch writes, the position is
//! left untouched and the outcome is `AttributesFull`.

use crate::{
    config::{Device, FuelSensor, ReadingType},
    macros::log_warn,
    position::{AttributeKey, InlineString, Position},
};

use super::{
    calibration::{bound_fuel_level, linear_calibration, CalibrationMode, FuelReading},
    consumption::{consumption_per_hour, consumption_per_km},
};

/// Which branch of the fuel model ran
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Position already carried a fuel level, or the device has no sensor
    Skipped,
    /// Sensor referenced but not configured, fuel fields zeroed
    NoSensor,
    /// Device calibration applied
    Calibrated(FuelReading),
    /// Reading-type conversion applied
    Converted,
    /// No room for the derived attributes, position left untouched
    AttributesFull,
}

/// Derive fuel metrics for `current` and store them on it
///
/// `previous` is the device's last known position, if any. Configuration
/// is read-only; only `current`'s attributes change, and either every
/// derived attribute is stored or none is.
pub fn enrich(
    previous: Option<&Position>,
    current: &mut Position,
    device: &Device,
    sensor: Option<&FuelSensor>,
    reading_type: Option<&ReadingType>,
) -> Outcome {
    if current.contains(&AttributeKey::FuelLevel) || device.fuel_sensor().is_none() {
        return Outcome::Skipped;
    }

    let Some(sensor) = sensor else {
        let empty = FuelReading::Empty.value();
        let writes = [
            (AttributeKey::FuelLevel, empty),
            (AttributeKey::FuelConsumption, empty),
            (AttributeKey::FuelUsed, empty),
        ];
        return store(current, &writes, Outcome::NoSensor);
    };

    if !sensor.calibrated && reading_type.is_none() {
        log_warn!(
            "Fuel sensor {} on device {} has no reading type {}, using raw values",
            sensor.id, device.id, sensor.reading_type_id
        );
    }

    match CalibrationMode::for_sensor(device, sensor, reading_type) {
        CalibrationMode::Calibrated { slope, constant, bounds } => {
            let raw = current.port(&sensor.fuel_level_port);
            let reading = bound_fuel_level(linear_calibration(raw, slope, constant), bounds);
            let level = reading.value();
            let writes = [
                (AttributeKey::FuelLevel, level),
                (AttributeKey::FuelConsumption, consumption_per_hour(previous, current, level)),
                (AttributeKey::FuelConsumptionPerKm, consumption_per_km(previous, current, level)),
            ];
            store(current, &writes, Outcome::Calibrated(reading))
        }
        CalibrationMode::Converted { multiplier } => {
            let level = current.port(&sensor.fuel_level_port) * multiplier;
            let rate = optional_port(current, sensor.fuel_rate_port.as_ref()) * multiplier;
            let used = optional_port(current, sensor.fuel_consumed_port.as_ref());
            let writes = [
                (AttributeKey::FuelLevel, level),
                (AttributeKey::FuelConsumption, rate),
                (AttributeKey::FuelUsed, used),
                (AttributeKey::FuelConsumptionPerKm, consumption_per_km(previous, current, level)),
            ];
            store(current, &writes, Outcome::Converted)
        }
    }
}

fn store(current: &mut Position, writes: &[(AttributeKey, f64)], outcome: Outcome) -> Outcome {
    match current.set_all(writes) {
        Ok(()) => outcome,
        Err(_) => Outcome::AttributesFull,
    }
}

fn optional_port(position: &Position, port: Option<&InlineString>) -> f64 {
    port.map(|id| position.port(id)).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SensorId,
        constants::buffers::{MAX_ATTRIBUTES, MAX_PORT_ID_LEN},
    };

    const HOUR_MS: u64 = 3_600_000;
    const SENSOR: SensorId = 3;

    fn port(id: &str) -> InlineString {
        InlineString::new(id).unwrap()
    }

    fn device() -> Device {
        Device::new(1).with_fuel_sensor(SENSOR).with_calibration(2.0, 1.0)
    }

    fn calibrated_sensor(lower: f64, upper: f64) -> FuelSensor {
        FuelSensor::calibrated(SENSOR, port("adc1"), lower, upper)
    }

    fn converted_sensor() -> FuelSensor {
        FuelSensor::converted(SENSOR, 9, port("fuel1"))
            .with_rate_port(port("fuelRate"))
            .with_consumed_port(port("fuelUsed"))
    }

    fn reading(time: u64, odometer: f64, adc: f64) -> Position {
        Position::builder(1)
            .time(time)
            .odometer(odometer)
            .port("adc1", adc)
            .build()
            .unwrap()
    }

    fn enriched(time: u64, odometer: f64, level: f64) -> Position {
        Position::builder(1)
            .time(time)
            .odometer(odometer)
            .attribute(AttributeKey::FuelLevel, level)
            .build()
            .unwrap()
    }

    /// Calibrated reading padded with `extra` numbered ports
    fn crowded(extra: usize) -> Position {
        let mut position = reading(1_000, 0.0, 10.0);
        for i in 0..extra {
            let mut name = heapless::String::<MAX_PORT_ID_LEN>::new();
            core::fmt::write(&mut name, format_args!("io{}", i)).unwrap();
            position.set(AttributeKey::port(&name).unwrap(), 1.0).unwrap();
        }
        position
    }

    #[test]
    fn existing_fuel_level_passes_through() {
        let mut current = enriched(1_000, 0.0, 33.0);
        let before = current.clone();

        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(current, before);
    }

    #[test]
    fn device_without_sensor_reference_passes_through() {
        let mut current = reading(1_000, 0.0, 10.0);
        let before = current.clone();

        let outcome = enrich(None, &mut current, &Device::new(1), None, None);

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(current, before);
    }

    #[test]
    fn missing_sensor_zeroes_fuel_fields() {
        let mut current = reading(1_000, 0.0, 10.0);

        let outcome = enrich(None, &mut current, &device(), None, None);

        assert_eq!(outcome, Outcome::NoSensor);
        assert_eq!(current.raw(&AttributeKey::FuelLevel), Some(0.0));
        assert_eq!(current.raw(&AttributeKey::FuelConsumption), Some(0.0));
        assert_eq!(current.raw(&AttributeKey::FuelUsed), Some(0.0));
        assert_eq!(current.raw(&AttributeKey::FuelConsumptionPerKm), None);
    }

    #[test]
    fn calibrated_linear_transform() {
        let mut current = reading(1_000, 0.0, 10.0);

        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(outcome, Outcome::Calibrated(FuelReading::Valid(21.0)));
        assert_eq!(current.fuel_level(), Some(21.0));
        // No previous position, no rates
        assert_eq!(current.raw(&AttributeKey::FuelConsumption), Some(0.0));
        assert_eq!(current.raw(&AttributeKey::FuelConsumptionPerKm), Some(0.0));
        // Calibrated branch leaves fuel used alone
        assert_eq!(current.raw(&AttributeKey::FuelUsed), None);
    }

    #[test]
    fn calibrated_below_lower_bound() {
        // 2 * 1 + 1 = 3 < 5
        let mut current = reading(1_000, 0.0, 1.0);
        let previous = enriched(0, 0.0, 50.0);

        let outcome = enrich(
            Some(&previous),
            &mut current,
            &device(),
            Some(&calibrated_sensor(5.0, 100.0)),
            None,
        );

        assert_eq!(outcome, Outcome::Calibrated(FuelReading::Untrusted));
        assert_eq!(current.fuel_level(), Some(-1.0));
        assert_eq!(current.get(&AttributeKey::FuelConsumption), 0.0);
    }

    #[test]
    fn calibrated_above_upper_bound() {
        // 2 * 74.5 + 1 = 150 > 100
        let mut current = reading(1_000, 0.0, 74.5);

        enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(current.fuel_level(), Some(100.0));
    }

    #[test]
    fn calibrated_rates_use_bounded_level() {
        let previous = enriched(0, 10_000.0, 50.0);
        // 2 * 19.5 + 1 = 40
        let mut current = reading(2 * HOUR_MS, 15_000.0, 19.5);

        enrich(Some(&previous), &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(current.fuel_level(), Some(40.0));
        assert_eq!(current.get(&AttributeKey::FuelConsumption), 5.0);
        assert_eq!(current.get(&AttributeKey::FuelConsumptionPerKm), 2.0);
    }

    #[test]
    fn converted_uses_reading_type() {
        let mut current = Position::builder(1)
            .time(1_000)
            .port("fuel1", 80.0)
            .port("fuelRate", 20.0)
            .port("fuelUsed", 7.5)
            .build()
            .unwrap();
        let reading_type = ReadingType::new(9, 0.5);

        let outcome = enrich(None, &mut current, &device(), Some(&converted_sensor()), Some(&reading_type));

        assert_eq!(outcome, Outcome::Converted);
        assert_eq!(current.fuel_level(), Some(40.0));
        assert_eq!(current.get(&AttributeKey::FuelConsumption), 10.0);
        // Fuel used is stored unconverted
        assert_eq!(current.get(&AttributeKey::FuelUsed), 7.5);
        assert_eq!(current.raw(&AttributeKey::FuelConsumptionPerKm), Some(0.0));
    }

    #[test]
    fn converted_rate_ignores_level_delta() {
        let previous = enriched(0, 10_000.0, 50.0);
        let mut current = Position::builder(1)
            .time(HOUR_MS)
            .odometer(15_000.0)
            .port("fuel1", 90.0)
            .port("fuelRate", 20.0)
            .build()
            .unwrap();
        let reading_type = ReadingType::new(9, 0.5);

        enrich(Some(&previous), &mut current, &device(), Some(&converted_sensor()), Some(&reading_type));

        assert_eq!(current.get(&AttributeKey::FuelConsumption), 10.0);
        // |45 - 50| / 5 km
        assert_eq!(current.get(&AttributeKey::FuelConsumptionPerKm), 1.0);
        // Missing consumed port reads as zero
        assert_eq!(current.raw(&AttributeKey::FuelUsed), Some(0.0));
    }

    #[test]
    fn converted_without_reading_type_keeps_raw_values() {
        let mut current = Position::builder(1)
            .port("fuel1", 80.0)
            .port("fuelRate", 20.0)
            .build()
            .unwrap();

        enrich(None, &mut current, &device(), Some(&converted_sensor()), None);

        assert_eq!(current.fuel_level(), Some(80.0));
        assert_eq!(current.get(&AttributeKey::FuelConsumption), 20.0);
    }

    #[test]
    fn inverted_bounds_mark_level_untrusted() {
        let device = Device::new(1).with_fuel_sensor(SENSOR).with_calibration(1.0, 0.0);
        let mut current = reading(1_000, 0.0, 50.0);

        let outcome = enrich(None, &mut current, &device, Some(&calibrated_sensor(100.0, 5.0)), None);

        assert_eq!(outcome, Outcome::Calibrated(FuelReading::Untrusted));
        assert_eq!(current.fuel_level(), Some(-1.0));
    }

    #[test]
    fn missing_level_port_reads_zero() {
        let mut current = Position::new(1, 1_000);

        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        // 2 * 0 + 1
        assert_eq!(outcome, Outcome::Calibrated(FuelReading::Valid(1.0)));
    }

    #[test]
    fn same_timestamp_is_zero_rate() {
        let previous = enriched(5_000, 10_000.0, 50.0);
        let mut current = reading(5_000, 10_000.0, 19.5);

        enrich(Some(&previous), &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        let per_hour = current.get(&AttributeKey::FuelConsumption);
        let per_km = current.get(&AttributeKey::FuelConsumptionPerKm);
        assert_eq!(per_hour, 0.0);
        assert_eq!(per_km, 0.0);
        assert_eq!(current.raw(&AttributeKey::FuelConsumption), Some(0.0));
    }

    #[test]
    fn enrichment_is_deterministic() {
        let previous = enriched(0, 10_000.0, 50.0);
        let fresh = reading(2 * HOUR_MS, 15_000.0, 19.5);
        let sensor = calibrated_sensor(0.0, 100.0);

        let mut first = fresh.clone();
        let mut second = fresh.clone();
        enrich(Some(&previous), &mut first, &device(), Some(&sensor), None);
        enrich(Some(&previous), &mut second, &device(), Some(&sensor), None);

        assert_eq!(first, second);
    }

    #[test]
    fn full_attribute_map_leaves_position_untouched() {
        // Two free slots, the calibrated branch writes three keys
        let mut current = crowded(MAX_ATTRIBUTES - 3);
        assert_eq!(current.attribute_count(), MAX_ATTRIBUTES - 2);
        let before = current.clone();

        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(outcome, Outcome::AttributesFull);
        assert_eq!(current, before);
        assert_eq!(current.fuel_level(), None);

        // Nothing was half-written, so a retry is not mistaken for a done position
        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);
        assert_eq!(outcome, Outcome::AttributesFull);
    }

    #[test]
    fn full_attribute_map_blocks_converted_branch() {
        // Three free slots, the converted branch writes four keys
        let mut current = crowded(MAX_ATTRIBUTES - 4);
        let before = current.clone();
        let reading_type = ReadingType::new(9, 0.5);

        let outcome = enrich(None, &mut current, &device(), Some(&converted_sensor()), Some(&reading_type));

        assert_eq!(outcome, Outcome::AttributesFull);
        assert_eq!(current, before);
    }

    #[test]
    fn exactly_enough_room_is_used() {
        let mut current = crowded(MAX_ATTRIBUTES - 4);

        let outcome = enrich(None, &mut current, &device(), Some(&calibrated_sensor(0.0, 100.0)), None);

        assert_eq!(outcome, Outcome::Calibrated(FuelReading::Valid(21.0)));
        assert_eq!(current.attribute_count(), MAX_ATTRIBUTES);
        assert_eq!(current.raw(&AttributeKey::FuelConsumptionPerKm), Some(0.0));
    }
}
