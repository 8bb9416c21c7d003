//! Error types for the growth engine

use crate::Metric;
use thiserror::Error;

/// Errors raised by domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A series needed as a forecast anchor has no measurements
    #[error("Insufficient data: no {metric} measurements recorded")]
    InsufficientData {
        /// The metric whose series is empty
        metric: Metric,
    },

    /// Positional access outside the series
    #[error("Index {index} out of range for series of length {len}")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Series length at the time of the request
        len: usize,
    },

    /// Measurement value rejected on construction
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),
}
