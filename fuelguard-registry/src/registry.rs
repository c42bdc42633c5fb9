//! Fleet Registry and Last-Position Store
//!
//! Thread-safe configuration store serving every lookup the fuel stage
//! needs. Configuration is replaced wholesale or per entity; positions are
//! recorded by the pipeline after each position has been enriched.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fuelguard_core::{
    config::{ReadingTypeId, SensorId},
    fuel::FuelBounds,
    position::DeviceId,
    traits::{DeviceLookup, FuelSensorLookup, PositionLookup, ReadingTypeLookup},
    Device, FuelSensor, Position, ReadingType,
};

use crate::{FleetConfig, RegistryError};

/// Thread-safe fleet registry
pub struct FleetRegistry {
    /// Devices indexed by id
    devices: RwLock<HashMap<DeviceId, Device>>,

    /// Fuel sensors indexed by id
    sensors: RwLock<HashMap<SensorId, FuelSensor>>,

    /// Reading types indexed by id
    reading_types: RwLock<HashMap<ReadingTypeId, ReadingType>>,

    /// Most recent position per device
    last_positions: RwLock<HashMap<DeviceId, Position>>,
}

impl FleetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            sensors: RwLock::new(HashMap::new()),
            reading_types: RwLock::new(HashMap::new()),
            last_positions: RwLock::new(HashMap::new()),
        }
    }

    /// Build a registry from a validated fleet description
    pub fn from_config(config: FleetConfig) -> Result<Self, RegistryError> {
        let registry = Self::new();
        registry.replace_config(config)?;
        Ok(registry)
    }

    /// Parse a JSON fleet description
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_config(serde_json::from_str(json)?)
    }

    /// Load a JSON fleet description from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let registry = Self::from_json(&json)?;
        log::debug!("Loaded fleet config from {}", path.display());
        Ok(registry)
    }

    /// Replace all configuration, keeping recorded positions
    ///
    /// Nothing changes if the new configuration is inconsistent.
    pub fn replace_config(&self, config: FleetConfig) -> Result<(), RegistryError> {
        let devices = index("device", config.devices, |d| d.id)?;
        let sensors = index("fuel sensor", config.fuel_sensors, |s| s.id)?;
        let reading_types = index("reading type", config.reading_types, |r| r.id)?;

        for sensor in sensors.values() {
            check_sensor(sensor, &reading_types)?;
        }
        for device in devices.values() {
            if let Some(sensor_id) = device.fuel_sensor() {
                if !sensors.contains_key(&sensor_id) {
                    log::warn!(
                        "Device {} references unconfigured fuel sensor {}",
                        device.id, sensor_id
                    );
                }
            }
        }

        // Lock order: devices, sensors, reading types
        let mut device_map = write(&self.devices)?;
        let mut sensor_map = write(&self.sensors)?;
        let mut reading_type_map = write(&self.reading_types)?;
        *device_map = devices;
        *sensor_map = sensors;
        *reading_type_map = reading_types;

        Ok(())
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Result<FleetConfig, RegistryError> {
        let mut config = FleetConfig {
            devices: read(&self.devices)?.values().copied().collect(),
            fuel_sensors: read(&self.sensors)?.values().copied().collect(),
            reading_types: read(&self.reading_types)?.values().copied().collect(),
        };
        config.devices.sort_by_key(|d| d.id);
        config.fuel_sensors.sort_by_key(|s| s.id);
        config.reading_types.sort_by_key(|r| r.id);
        Ok(config)
    }

    /// Add or replace a device
    pub fn upsert_device(&self, device: Device) -> Result<(), RegistryError> {
        write(&self.devices)?.insert(device.id, device);
        Ok(())
    }

    /// Remove a device and its last known position
    pub fn remove_device(&self, id: DeviceId) -> Result<Option<Device>, RegistryError> {
        let removed = write(&self.devices)?.remove(&id);
        write(&self.last_positions)?.remove(&id);
        Ok(removed)
    }

    /// Add or replace a fuel sensor
    pub fn upsert_sensor(&self, sensor: FuelSensor) -> Result<(), RegistryError> {
        // Lock order: sensors, reading types. The reading type stays held
        // until the sensor is in.
        let mut sensor_map = write(&self.sensors)?;
        let reading_types = read(&self.reading_types)?;
        check_sensor(&sensor, &reading_types)?;
        sensor_map.insert(sensor.id, sensor);
        Ok(())
    }

    /// Add or replace a reading type
    pub fn upsert_reading_type(&self, reading_type: ReadingType) -> Result<(), RegistryError> {
        write(&self.reading_types)?.insert(reading_type.id, reading_type);
        Ok(())
    }

    /// Record a processed position as its device's last known one
    ///
    /// Older positions (by device time) do not replace newer ones. Returns
    /// whether the position was stored.
    pub fn record_position(&self, position: &Position) -> Result<bool, RegistryError> {
        let mut positions = write(&self.last_positions)?;
        match positions.get(&position.device_id) {
            Some(last) if last.device_time > position.device_time => {
                log::debug!(
                    "Ignoring out-of-order position for device {} ({} < {})",
                    position.device_id, position.device_time, last.device_time
                );
                Ok(false)
            }
            _ => {
                positions.insert(position.device_id, position.clone());
                Ok(true)
            }
        }
    }

    /// Number of configured devices
    pub fn device_count(&self) -> Result<usize, RegistryError> {
        Ok(read(&self.devices)?.len())
    }
}

impl Default for FleetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLookup for FleetRegistry {
    fn device(&self, id: DeviceId) -> Option<Device> {
        lookup(&self.devices, &id)
    }
}

impl FuelSensorLookup for FleetRegistry {
    fn fuel_sensor(&self, id: SensorId) -> Option<FuelSensor> {
        lookup(&self.sensors, &id)
    }
}

impl ReadingTypeLookup for FleetRegistry {
    fn reading_type(&self, id: ReadingTypeId) -> Option<ReadingType> {
        lookup(&self.reading_types, &id)
    }
}

impl PositionLookup for FleetRegistry {
    fn last_position(&self, device_id: DeviceId) -> Option<Position> {
        lookup(&self.last_positions, &device_id)
    }
}

fn index<T>(
    kind: &'static str,
    items: Vec<T>,
    id: impl Fn(&T) -> u64,
) -> Result<HashMap<u64, T>, RegistryError> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let key = id(&item);
        if map.insert(key, item).is_some() {
            return Err(RegistryError::DuplicateId { kind, id: key });
        }
    }
    Ok(map)
}

fn check_sensor(
    sensor: &FuelSensor,
    reading_types: &HashMap<ReadingTypeId, ReadingType>,
) -> Result<(), RegistryError> {
    if sensor.calibrated && !FuelBounds::of(sensor).is_ordered() {
        return Err(RegistryError::InvertedBounds {
            sensor: sensor.id,
            lower: sensor.lower_bound,
            upper: sensor.upper_bound,
        });
    }
    if !sensor.calibrated && !reading_types.contains_key(&sensor.reading_type_id) {
        return Err(RegistryError::UnknownReadingType {
            sensor: sensor.id,
            reading_type: sensor.reading_type_id,
        });
    }
    Ok(())
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, RegistryError> {
    lock.read().map_err(|_| RegistryError::LockPoisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, RegistryError> {
    lock.write().map_err(|_| RegistryError::LockPoisoned)
}

fn lookup<V: Clone>(lock: &RwLock<HashMap<u64, V>>, id: &u64) -> Option<V> {
    match lock.read() {
        Ok(map) => map.get(id).cloned(),
        Err(_) => {
            log::warn!("Registry lock poisoned, treating {} as unknown", id);
            None
        }
    }
}
