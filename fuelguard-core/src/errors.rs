//! Error Types for Fuel Enrichment
//!
//! ## Design Philosophy
//!
//! Numeric edge cases in the fuel model never become errors. A sensor below
//! its lower bound, a missing previous position, two readings sharing a
//! timestamp or a stationary odometer all resolve to defined values (`-1`
//! or `0`) and the position keeps flowing through the pipeline.
//!
//! What remains are resource problems when building positions:
//!
//! - `ResourceExhausted`: the position's inline attribute map is full
//! - `PortIdTooLong`: a raw port identifier does not fit inline storage
//!
//! The fuel stage itself reports a full map as `Outcome::AttributesFull`
//! rather than an error. Other stages may still return one.
//!
//! Errors are `Copy` and carry no heap data so they can be returned from
//! the hot path on constrained targets.
//!
//! ```rust
//! use fuelguard_core::{EnrichError, PositionStage};
//!
//! fn run<S: PositionStage>(stage: &S, position: &mut fuelguard_core::Position) {
//!     match stage.process(position) {
//!         Ok(()) => {}
//!         Err(EnrichError::ResourceExhausted { .. }) => {
//!             // decoder emitted too many raw attributes
//!         }
//!         Err(_) => {}
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for enrichment operations
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Enrichment errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichError {
    /// Attribute map has no room for another key
    #[error("Position attributes full ({capacity} slots)")]
    ResourceExhausted {
        /// Capacity of the attribute map
        capacity: usize,
    },

    /// Port identifier longer than inline storage allows
    #[error("Port id of {len} bytes exceeds {max}")]
    PortIdTooLong {
        /// Length of the rejected identifier
        len: usize,
        /// Maximum supported length
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<EnrichError>() <= 24);
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_messages() {
        let err = EnrichError::ResourceExhausted { capacity: 64 };
        assert_eq!(err.to_string(), "Position attributes full (64 slots)");

        let err = EnrichError::PortIdTooLong { len: 20, max: 16 };
        assert_eq!(err.to_string(), "Port id of 20 bytes exceeds 16");
    }
}
