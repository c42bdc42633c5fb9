//! Calibrated Fuel Sensor Example
//!
//! Feeds a short trip from a float-sender fuel probe through the fuel model
//! and prints the derived attributes for each position.
//!
//! ## What You'll Learn
//!
//! - Configuring a device calibration and sensor bounds
//! - Running `enrich` against the previous position
//! - Telling an untrusted reading (`-1`) from a real level
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_calibrated_sensor
//! ```

use fuelguard_core::{
    enrich,
    position::InlineString,
    AttributeKey, Device, FuelReading, FuelSensor, Outcome, Position,
};

const MINUTE_MS: u64 = 60_000;

fn main() -> Result<(), fuelguard_core::EnrichError> {
    println!("FuelGuard Calibrated Sensor Example");
    println!("===================================\n");

    // 4096-count ADC on an 80 liter tank: 0.02 L per count, 1.5 L dead volume
    let device = Device::new(1).with_fuel_sensor(7).with_calibration(0.02, 1.5);
    let sensor = FuelSensor::calibrated(7, InlineString::try_new("adc1")?, 2.0, 80.0);

    // (minutes, odometer m, raw ADC)
    let trip = [
        (0, 120_000.0, 3_600.0),
        (10, 128_500.0, 3_550.0),
        (20, 137_000.0, 3_490.0),
        (30, 137_000.0, 10.0),     // probe disconnected
        (40, 145_200.0, 3_380.0),
        (50, 152_900.0, 4_095.0),  // sloshing, above tank capacity
    ];

    let mut previous: Option<Position> = None;
    for (minute, odometer, raw) in trip {
        let mut position = Position::builder(device.id)
            .time(minute * MINUTE_MS)
            .odometer(odometer)
            .port("adc1", raw)
            .build()?;

        let outcome = enrich(previous.as_ref(), &mut position, &device, Some(&sensor), None);

        let note = match outcome {
            Outcome::Calibrated(FuelReading::Untrusted) => "untrusted",
            Outcome::Calibrated(FuelReading::Saturated(_)) => "saturated",
            _ => "",
        };
        println!(
            "t={:2}min  level={:6.2} L  {:6.2} L/h  {:5.3} L/km  {}",
            minute,
            position.get(&AttributeKey::FuelLevel),
            position.get(&AttributeKey::FuelConsumption),
            position.get(&AttributeKey::FuelConsumptionPerKm),
            note,
        );

        previous = Some(position);
    }

    Ok(())
}
