//! Growthline Domain Layer
//!
//! This crate contains the growth-prediction engine: age arithmetic, WHO
//! percentile reference tables, the growth-rate heuristic and the weekly
//! forecast built on top of them. It performs no I/O; persistence is reached
//! only through the [`traits::MeasurementStore`] boundary.
//!
//! ## Key Concepts
//!
//! - **Measurement series**: dated weight and height readings, kept in date order
//! - **Percentile row**: 3rd/15th/50th/85th/97th reference values at an age
//! - **Growth rate**: weekly gain, a step function of age in weeks
//! - **Anchor**: the latest real reading a forecast extrapolates from
//! - **Safety threshold**: car-seat weight/height limit that ends a forecast
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use growthline_domain::{predict, PredictionConfig, SeriesPair};
//!
//! let birth = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
//! let today = NaiveDate::from_ymd_opt(2025, 7, 13).unwrap();
//! let records = predict(&SeriesPair::default(), &PredictionConfig::new(birth, today)).unwrap();
//! assert_eq!(records[0].date, today);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod age;
pub mod error;
pub mod growth_rate;
pub mod measurement;
pub mod metric;
pub mod percentile;
pub mod prediction;
pub mod stats;
pub mod timeline;
pub mod traits;

// Re-exports for convenience
pub use age::Age;
pub use error::DomainError;
pub use growth_rate::GrowthRateTable;
pub use measurement::{default_birth_date, Measurement, MeasurementSeries, SeriesPair};
pub use metric::Metric;
pub use percentile::{Percentile, PercentileRow, PercentileTable, PERCENTILE_RANKS};
pub use prediction::{
    first_crossing, predict, PredictionConfig, PredictionRecord, SafetyThreshold,
};
pub use stats::{current_stats, CurrentStats};
pub use timeline::{timeline, PointKind, TimelinePoint, DEFAULT_TIMELINE_WEEKS};
