//! Snapshot of the latest readings against today's reference curves

use crate::{Age, DomainError, Measurement, Metric, Percentile, PercentileTable, SeriesPair};
use chrono::NaiveDate;
use serde::Serialize;

/// Latest readings ranked at the subject's current age
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStats {
    /// Age today
    pub age: Age,
    /// Most recent weight reading
    pub last_weight: Measurement,
    /// Most recent height reading
    pub last_height: Measurement,
    /// Rank of the last weight
    pub weight_percentile: Percentile,
    /// Rank of the last height
    pub height_percentile: Percentile,
}

/// Rank the most recent readings against the reference row for `today`
///
/// Readings are ranked at today's age rather than the age they were taken
/// at, so an old reading drifts toward lower ranks as time passes.
///
/// # Errors
/// Returns [`DomainError::InsufficientData`] if either series is empty
pub fn current_stats(
    series: &SeriesPair,
    birth_date: NaiveDate,
    today: NaiveDate,
) -> Result<CurrentStats, DomainError> {
    let last_weight = *series.weight.last().ok_or(DomainError::InsufficientData {
        metric: Metric::Weight,
    })?;
    let last_height = *series.height.last().ok_or(DomainError::InsufficientData {
        metric: Metric::Height,
    })?;

    let age = Age::between(birth_date, today);
    let weight_row = PercentileTable::who(Metric::Weight).row_at(age.weeks as f64);
    let height_row = PercentileTable::who(Metric::Height).row_at(age.weeks as f64);

    Ok(CurrentStats {
        age,
        last_weight,
        last_height,
        weight_percentile: Percentile::rank(last_weight.value, &weight_row),
        height_percentile: Percentile::rank(last_height.value, &height_row),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stats_for_default_dataset() {
        let stats = current_stats(&SeriesPair::default(), date(2025, 5, 7), date(2025, 7, 13)).unwrap();

        assert_eq!(stats.age.weeks, 9);
        assert_eq!(stats.last_weight.value, 5.44);
        assert_eq!(stats.last_height.value, 61.0);
        assert_eq!(stats.weight_percentile, Percentile::Rank(33));
        assert_eq!(stats.height_percentile, Percentile::Rank(85));
    }

    #[test]
    fn test_old_readings_rank_lower_later() {
        let pair = SeriesPair::default();
        let early = current_stats(&pair, date(2025, 5, 7), date(2025, 7, 13)).unwrap();
        let late = current_stats(&pair, date(2025, 5, 7), date(2026, 1, 1)).unwrap();

        assert_eq!(late.weight_percentile, Percentile::BelowRange);
        assert_ne!(early.weight_percentile, late.weight_percentile);
    }

    #[test]
    fn test_empty_height_is_insufficient() {
        let mut pair = SeriesPair::default();
        pair.height = Default::default();
        let err = current_stats(&pair, date(2025, 5, 7), date(2025, 7, 13)).unwrap_err();
        assert_eq!(err, DomainError::InsufficientData { metric: Metric::Height });
    }
}
