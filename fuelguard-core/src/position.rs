//! Position Model for the Enrichment Pipeline
//!
//! ## Overview
//!
//! A `Position` is one telemetry reading from a tracked device. Decoders
//! upstream fill it with raw sensor-port values; pipeline stages such as the
//! fuel stage read those ports and add derived attributes.
//!
//! ## Attribute Storage
//!
//! Attributes live in a fixed-capacity `heapless::FnvIndexMap` so a position
//! never touches the heap while it moves through the pipeline:
//!
//! ```text
//! Position
//! ├── device_id:   u64
//! ├── device_time: u64 (ms since epoch, device clock)
//! ├── odometer_m:  f64
//! └── attributes:  FnvIndexMap<AttributeKey, f64, 64>
//!     ├── Port("adc1")        → 10.0   (raw, from decoder)
//!     ├── FuelLevel           → 21.0   (derived)
//!     └── FuelConsumption     → 5.0    (derived)
//! ```
//!
//! ## Missing Values
//!
//! `get` resolves a missing or non-finite attribute to `0.0`. One bad port
//! must not block enrichment of the rest of the position, so "no reading"
//! and "reading of zero" are deliberately indistinguishable through `get`.
//! Use `raw` when the difference matters.

use core::fmt;
use heapless::FnvIndexMap;

use crate::{
    constants::buffers::{MAX_ATTRIBUTES, MAX_PORT_ID_LEN},
    errors::{EnrichError, EnrichResult},
    time::Timestamp,
};

/// Device identifier
pub type DeviceId = u64;

/// Inline string for port identifiers
///
/// Avoids heap allocation for decoder port names
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InlineString {
    len: u8,
    data: [u8; MAX_PORT_ID_LEN],
}

impl InlineString {
    /// Create from string slice, `None` if it does not fit
    pub fn new(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() > MAX_PORT_ID_LEN {
            return None;
        }

        let mut data = [0u8; MAX_PORT_ID_LEN];
        data[..bytes.len()].copy_from_slice(bytes);

        Some(Self {
            len: bytes.len() as u8,
            data,
        })
    }

    /// Create from string slice, reporting the length on failure
    pub fn try_new(s: &str) -> EnrichResult<Self> {
        Self::new(s).ok_or(EnrichError::PortIdTooLong {
            len: s.len(),
            max: MAX_PORT_ID_LEN,
        })
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        // Only valid UTF-8 is ever copied in by new()
        core::str::from_utf8(&self.data[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Debug for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InlineString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for InlineString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PortVisitor;

        impl<'de> serde::de::Visitor<'de> for PortVisitor {
            type Value = InlineString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a port id of at most {} bytes", MAX_PORT_ID_LEN)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                InlineString::new(v).ok_or_else(|| E::invalid_length(v.len(), &self))
            }
        }

        deserializer.deserialize_str(PortVisitor)
    }
}

/// Key of a position attribute
///
/// Well-known derived metrics have their own variants; everything the
/// decoder stored under a port name is a `Port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Fuel level in liters, or `-1` for an untrusted reading
    FuelLevel,
    /// Fuel consumption in liters per hour
    FuelConsumption,
    /// Fuel consumption in liters per kilometer
    FuelConsumptionPerKm,
    /// Fuel used as reported by the device
    FuelUsed,
    /// Raw decoder slot (analog input, CAN value, ...)
    Port(InlineString),
}

impl AttributeKey {
    /// Build a port key from its name
    pub fn port(id: &str) -> EnrichResult<Self> {
        InlineString::try_new(id).map(AttributeKey::Port)
    }

    /// Stable wire name of the key
    pub fn name(&self) -> &str {
        match self {
            AttributeKey::FuelLevel => "fuel",
            AttributeKey::FuelConsumption => "fuelConsumption",
            AttributeKey::FuelConsumptionPerKm => "fuelConsumptionPerKm",
            AttributeKey::FuelUsed => "fuelUsed",
            AttributeKey::Port(id) => id.as_str(),
        }
    }
}

/// A telemetry reading from a tracked device
#[derive(Debug, Clone)]
pub struct Position {
    /// Device that produced the reading
    pub device_id: DeviceId,
    /// Device clock timestamp in milliseconds
    pub device_time: Timestamp,
    /// Total distance travelled in meters
    pub odometer_m: f64,
    attributes: FnvIndexMap<AttributeKey, f64, MAX_ATTRIBUTES>,
}

impl Position {
    /// Create an empty position
    pub fn new(device_id: DeviceId, device_time: Timestamp) -> Self {
        Self {
            device_id,
            device_time,
            odometer_m: 0.0,
            attributes: FnvIndexMap::new(),
        }
    }

    /// Start building a position for a device
    pub fn builder(device_id: DeviceId) -> PositionBuilder {
        PositionBuilder::new(device_id)
    }

    /// Whether the attribute is present at all
    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute value, `0.0` if missing or not a finite number
    pub fn get(&self, key: &AttributeKey) -> f64 {
        match self.attributes.get(key) {
            Some(value) if value.is_finite() => *value,
            _ => 0.0,
        }
    }

    /// Attribute value exactly as stored
    pub fn raw(&self, key: &AttributeKey) -> Option<f64> {
        self.attributes.get(key).copied()
    }

    /// Value of a raw port, `0.0` if missing
    pub fn port(&self, id: &InlineString) -> f64 {
        self.get(&AttributeKey::Port(*id))
    }

    /// Set or overwrite an attribute
    pub fn set(&mut self, key: AttributeKey, value: f64) -> EnrichResult<()> {
        self.attributes
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| EnrichError::ResourceExhausted {
                capacity: MAX_ATTRIBUTES,
            })
    }

    /// Set several attributes, or none if they do not all fit
    ///
    /// Keys already present are overwritten and take no new slot.
    pub fn set_all(&mut self, entries: &[(AttributeKey, f64)]) -> EnrichResult<()> {
        let new_keys = entries.iter().filter(|(key, _)| !self.contains(key)).count();
        if self.attributes.len() + new_keys > MAX_ATTRIBUTES {
            return Err(EnrichError::ResourceExhausted {
                capacity: MAX_ATTRIBUTES,
            });
        }

        for (key, value) in entries {
            self.set(*key, *value)?;
        }
        Ok(())
    }

    /// Stored fuel level, if any stage has set one
    pub fn fuel_level(&self) -> Option<f64> {
        self.raw(&AttributeKey::FuelLevel)
    }

    /// Iterate over all attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&AttributeKey, &f64)> {
        self.attributes.iter()
    }

    /// Number of attributes carried
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.device_id == other.device_id
            && self.device_time == other.device_time
            && self.odometer_m == other.odometer_m
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .all(|(key, value)| other.attributes.get(key) == Some(value))
    }
}

/// Position builder for convenient construction
///
/// Errors (oversized port ids, full attribute map) are held until `build`.
pub struct PositionBuilder {
    position: Position,
    error: Option<EnrichError>,
}

impl PositionBuilder {
    /// Create new builder for a device
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            position: Position::new(device_id, 0),
            error: None,
        }
    }

    /// Set device timestamp
    pub fn time(mut self, device_time: Timestamp) -> Self {
        self.position.device_time = device_time;
        self
    }

    /// Set odometer in meters
    pub fn odometer(mut self, meters: f64) -> Self {
        self.position.odometer_m = meters;
        self
    }

    /// Store a raw port value
    pub fn port(self, id: &str, value: f64) -> Self {
        match AttributeKey::port(id) {
            Ok(key) => self.attribute(key, value),
            Err(e) => self.fail(e),
        }
    }

    /// Store any attribute
    pub fn attribute(mut self, key: AttributeKey, value: f64) -> Self {
        if let Err(e) = self.position.set(key, value) {
            return self.fail(e);
        }
        self
    }

    /// Finish the position
    pub fn build(self) -> EnrichResult<Position> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.position),
        }
    }

    fn fail(mut self, error: EnrichError) -> Self {
        self.error.get_or_insert(error);
        self
    }
}
