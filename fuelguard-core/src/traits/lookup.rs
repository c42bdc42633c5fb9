//! Read-only lookup capabilities
//!
//! Implementations hand out owned snapshots. A lookup backed by a mutable
//! store must not return a torn value, and the caller must not run two
//! enrichments for the same device concurrently when `last_position` comes
//! from a store that the pipeline updates after each position.

use crate::{
    config::{Device, FuelSensor, ReadingType, ReadingTypeId, SensorId},
    position::{DeviceId, Position},
};

/// Device configuration by id
pub trait DeviceLookup {
    /// Device with the given id, if known
    fn device(&self, id: DeviceId) -> Option<Device>;
}

/// Fuel sensor configuration by id
pub trait FuelSensorLookup {
    /// Sensor with the given id, if configured
    fn fuel_sensor(&self, id: SensorId) -> Option<FuelSensor>;
}

/// Reading type configuration by id
pub trait ReadingTypeLookup {
    /// Reading type with the given id, if configured
    fn reading_type(&self, id: ReadingTypeId) -> Option<ReadingType>;
}

/// Last known position of a device
pub trait PositionLookup {
    /// Most recent position before the one being processed, `None` for a
    /// device's first reading
    fn last_position(&self, device_id: DeviceId) -> Option<Position>;
}

/// Everything the fuel stage needs to resolve its inputs
pub trait FleetLookup: DeviceLookup + FuelSensorLookup + ReadingTypeLookup + PositionLookup {}

impl<T> FleetLookup for T where T: DeviceLookup + FuelSensorLookup + ReadingTypeLookup + PositionLookup {}

impl<T: DeviceLookup + ?Sized> DeviceLookup for &T {
    fn device(&self, id: DeviceId) -> Option<Device> {
        (**self).device(id)
    }
}

impl<T: FuelSensorLookup + ?Sized> FuelSensorLookup for &T {
    fn fuel_sensor(&self, id: SensorId) -> Option<FuelSensor> {
        (**self).fuel_sensor(id)
    }
}

impl<T: ReadingTypeLookup + ?Sized> ReadingTypeLookup for &T {
    fn reading_type(&self, id: ReadingTypeId) -> Option<ReadingType> {
        (**self).reading_type(id)
    }
}

impl<T: PositionLookup + ?Sized> PositionLookup for &T {
    fn last_position(&self, device_id: DeviceId) -> Option<Position> {
        (**self).last_position(device_id)
    }
}
