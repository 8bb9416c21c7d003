//! Growth rate model
//!
//! Weekly growth rates are a step function of age: each tier applies while
//! the age in weeks is below its threshold, and a final open-ended rate
//! covers everything older.

use crate::Metric;

/// Age-banded weekly growth rates for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRateTable<'a> {
    /// `(week_threshold, weekly_rate)` tiers, thresholds ascending
    tiers: &'a [(i64, f64)],
    /// Rate once the age reaches the last threshold
    open_ended: f64,
}

impl<'a> GrowthRateTable<'a> {
    /// The bundled heuristic table for a metric
    pub fn for_metric(metric: Metric) -> GrowthRateTable<'static> {
        match metric {
            Metric::Weight => WEIGHT_RATES,
            Metric::Height => HEIGHT_RATES,
        }
    }

    /// Weekly rate at the given age in weeks
    pub fn rate_at(&self, age_weeks: i64) -> f64 {
        self.tiers
            .iter()
            .find(|(threshold, _)| age_weeks < *threshold)
            .map(|(_, rate)| *rate)
            .unwrap_or(self.open_ended)
    }

    /// Finite tiers in ascending threshold order
    pub fn tiers(&self) -> &'a [(i64, f64)] {
        self.tiers
    }

    /// Rate applied past the last threshold
    pub fn open_ended(&self) -> f64 {
        self.open_ended
    }
}

/// Weight gain in kg per week
pub static WEIGHT_RATES: GrowthRateTable<'static> = GrowthRateTable {
    tiers: &[
        (13, 0.23),
        (17, 0.21),
        (22, 0.18),
        (26, 0.16),
        (35, 0.14),
        (43, 0.12),
        (52, 0.10),
        (65, 0.08),
        (78, 0.06),
        (91, 0.05),
    ],
    open_ended: 0.04,
};

/// Length gain in cm per week
pub static HEIGHT_RATES: GrowthRateTable<'static> = GrowthRateTable {
    tiers: &[
        (13, 0.80),
        (17, 0.70),
        (22, 0.60),
        (26, 0.50),
        (35, 0.45),
        (43, 0.40),
        (52, 0.35),
        (65, 0.30),
        (78, 0.25),
        (91, 0.22),
    ],
    open_ended: 0.20,
};
