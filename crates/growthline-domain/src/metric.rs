//! Metric module - the two tracked growth dimensions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked growth dimension
///
/// Each metric has its own measurement series, reference percentile table
/// and growth-rate table:
/// - Weight: kilograms
/// - Height: centimetres (recumbent length for infants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Body weight in kg
    Weight,

    /// Body length in cm
    Height,
}

impl Metric {
    /// Get the metric name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Height => "height",
        }
    }

    /// Unit suffix used when displaying values
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::Height => "cm",
        }
    }

    /// Parse a metric from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weight" => Some(Metric::Weight),
            "height" | "length" => Some(Metric::Height),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid metric: {}", s))
    }
}
