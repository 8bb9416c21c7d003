//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::SeriesPair;

/// Trait for persisting the measurement history
///
/// Implemented by the infrastructure layer (growthline-store). The history
/// is stored as a single document under a fixed key; prediction code never
/// touches the store and only sees the [`SeriesPair`] it was handed.
pub trait MeasurementStore {
    /// Error type for store operations
    type Error;

    /// Load the saved history, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<SeriesPair>, Self::Error>;

    /// Replace the saved history
    fn save(&mut self, series: &SeriesPair) -> Result<(), Self::Error>;

    /// Forget the saved history
    fn clear(&mut self) -> Result<(), Self::Error>;
}
