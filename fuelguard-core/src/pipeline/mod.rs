//! Built-in Position Pipeline Stages
//!
//! Stages plug into a surrounding pipeline that decides when to call them.
//! They only resolve their inputs through the lookup traits and enrich the
//! position they are given.

pub mod stages;

pub use stages::FuelLevelStage;
