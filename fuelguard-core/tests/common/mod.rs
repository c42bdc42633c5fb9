//! Common test utilities for integration tests
//!
//! This module provides:
//! - An in-memory fleet implementing every lookup capability
//! - A route simulator producing positions along a list of waypoints

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use fuelguard_core::{
    config::{ReadingTypeId, SensorId},
    position::DeviceId,
    traits::{DeviceLookup, FuelSensorLookup, PositionLookup, ReadingTypeLookup},
    Device, FuelSensor, Position, ReadingType,
};

pub const HOUR_MS: u64 = 3_600_000;

/// Fleet configuration plus a last-known position store
#[derive(Default)]
pub struct MemoryFleet {
    pub devices: HashMap<DeviceId, Device>,
    pub sensors: HashMap<SensorId, FuelSensor>,
    pub reading_types: HashMap<ReadingTypeId, ReadingType>,
    last: Mutex<HashMap<DeviceId, Position>>,
}

impl MemoryFleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.insert(device.id, device);
        self
    }

    pub fn with_sensor(mut self, sensor: FuelSensor) -> Self {
        self.sensors.insert(sensor.id, sensor);
        self
    }

    pub fn with_reading_type(mut self, reading_type: ReadingType) -> Self {
        self.reading_types.insert(reading_type.id, reading_type);
        self
    }

    /// Store a processed position as the device's last known one
    pub fn record(&self, position: &Position) {
        self.last
            .lock()
            .unwrap()
            .insert(position.device_id, position.clone());
    }
}

impl DeviceLookup for MemoryFleet {
    fn device(&self, id: DeviceId) -> Option<Device> {
        self.devices.get(&id).copied()
    }
}

impl FuelSensorLookup for MemoryFleet {
    fn fuel_sensor(&self, id: SensorId) -> Option<FuelSensor> {
        self.sensors.get(&id).copied()
    }
}

impl ReadingTypeLookup for MemoryFleet {
    fn reading_type(&self, id: ReadingTypeId) -> Option<ReadingType> {
        self.reading_types.get(&id).copied()
    }
}

impl PositionLookup for MemoryFleet {
    fn last_position(&self, device_id: DeviceId) -> Option<Position> {
        self.last.lock().unwrap().get(&device_id).cloned()
    }
}

/// Waypoint on a simulated route: latitude, longitude, raw fuel reading
#[derive(Debug, Clone, Copy)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub fuel: f64,
}

/// Replays a route as a stream of positions
///
/// Segments between waypoints are split into steps of `step_deg` degrees.
/// Every point carries the raw fuel reading of the waypoint that starts its
/// segment, one point per `period_ms`.
pub struct RouteSimulator {
    device_id: DeviceId,
    fuel_port: &'static str,
    step_deg: f64,
    period_ms: u64,
    start_ms: u64,
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

impl RouteSimulator {
    pub fn new(device_id: DeviceId, fuel_port: &'static str) -> Self {
        Self {
            device_id,
            fuel_port,
            step_deg: 0.001,
            period_ms: 4 * 60 * 1000,
            start_ms: 1_700_000_000_000,
        }
    }

    pub fn period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn step_deg(mut self, step_deg: f64) -> Self {
        self.step_deg = step_deg;
        self
    }

    /// Positions along the route from the first to the last waypoint
    pub fn positions(&self, waypoints: &[Waypoint]) -> Vec<Position> {
        let mut points = Vec::new();
        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let length = ((to.lat - from.lat).powi(2) + (to.lon - from.lon).powi(2)).sqrt();
            let count = (length / self.step_deg).ceil().max(1.0) as usize;
            for j in 0..count {
                let t = j as f64 / count as f64;
                points.push((
                    from.lat + (to.lat - from.lat) * t,
                    from.lon + (to.lon - from.lon) * t,
                    from.fuel,
                ));
            }
        }

        let mut odometer = 0.0;
        let mut previous: Option<(f64, f64)> = None;
        points
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lon, fuel))| {
                if let Some((plat, plon)) = previous {
                    odometer += haversine_m(plat, plon, lat, lon);
                }
                previous = Some((lat, lon));

                Position::builder(self.device_id)
                    .time(self.start_ms + i as u64 * self.period_ms)
                    .odometer(odometer)
                    .port(self.fuel_port, fuel)
                    .build()
                    .unwrap()
            })
            .collect()
    }
}

fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}
