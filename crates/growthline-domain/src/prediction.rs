//! Prediction generator
//!
//! Produces a weekly forecast from the most recent weight and height
//! readings. Each step re-evaluates the growth rate for the current age and
//! applies it to the whole time elapsed since the anchor reading; growth is
//! not compounded step over step. Generation stops after the first record
//! that reaches the safety threshold or once the horizon is passed.

use crate::{
    Age, DomainError, GrowthRateTable, Metric, Percentile, PercentileTable, SeriesPair,
};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between consecutive forecast records
pub const FORECAST_STEP_DAYS: u64 = 7;

/// Default forecast length from today
pub const DEFAULT_HORIZON_MONTHS: u32 = 24;

/// Car-seat capacity limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyThreshold {
    /// Maximum weight in kg
    pub weight_limit: f64,
    /// Maximum height in cm
    pub height_limit: f64,
}

impl SafetyThreshold {
    /// Whether a weight/height pair reaches either limit
    pub fn is_crossed(&self, weight: f64, height: f64) -> bool {
        height >= self.height_limit || weight >= self.weight_limit
    }
}

impl Default for SafetyThreshold {
    fn default() -> Self {
        Self {
            weight_limit: 13.6,
            height_limit: 81.0,
        }
    }
}

/// Inputs to a prediction run besides the measurements themselves
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionConfig {
    /// Subject's birth date
    pub birth_date: NaiveDate,
    /// Limits that end the forecast
    pub threshold: SafetyThreshold,
    /// Last date (inclusive) a record may fall on
    pub horizon: NaiveDate,
}

impl PredictionConfig {
    /// Default threshold with a horizon [`DEFAULT_HORIZON_MONTHS`] after `today`
    pub fn new(birth_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            birth_date,
            threshold: SafetyThreshold::default(),
            horizon: horizon_after(today, DEFAULT_HORIZON_MONTHS),
        }
    }

    /// Replace the safety threshold
    pub fn with_threshold(mut self, threshold: SafetyThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the horizon
    pub fn with_horizon(mut self, horizon: NaiveDate) -> Self {
        self.horizon = horizon;
        self
    }
}

/// Date `months` after `today`, saturating at the end of the calendar
pub fn horizon_after(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// One forecast step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    /// Forecast date
    pub date: NaiveDate,
    /// Predicted weight in kg
    pub predicted_weight: f64,
    /// Predicted height in cm
    pub predicted_height: f64,
    /// Rank of the predicted weight at this age
    pub weight_percentile: Percentile,
    /// Rank of the predicted height at this age
    pub height_percentile: Percentile,
    /// WHO median weight at this age
    pub who50th_weight: f64,
    /// WHO median height at this age
    pub who50th_height: f64,
    /// Age in whole weeks
    pub age_weeks: i64,
    /// Age in average-length months
    pub age_months: i64,
}

impl PredictionRecord {
    /// Whether this record reaches the threshold
    pub fn crosses(&self, threshold: &SafetyThreshold) -> bool {
        threshold.is_crossed(self.predicted_weight, self.predicted_height)
    }
}

/// Generate the weekly forecast
///
/// The first record falls one step after the later of the two anchor
/// readings. The record that first reaches the threshold is included and
/// ends the forecast.
///
/// # Errors
/// Returns [`DomainError::InsufficientData`] if either series is empty
pub fn predict(
    series: &SeriesPair,
    config: &PredictionConfig,
) -> Result<Vec<PredictionRecord>, DomainError> {
    let last_weight = series.weight.last().ok_or(DomainError::InsufficientData {
        metric: Metric::Weight,
    })?;
    let last_height = series.height.last().ok_or(DomainError::InsufficientData {
        metric: Metric::Height,
    })?;

    let weight_rates = GrowthRateTable::for_metric(Metric::Weight);
    let height_rates = GrowthRateTable::for_metric(Metric::Height);
    let weight_table = PercentileTable::who(Metric::Weight);
    let height_table = PercentileTable::who(Metric::Height);

    let step = Days::new(FORECAST_STEP_DAYS);
    let mut records = Vec::new();
    let mut current = last_weight.date.max(last_height.date).checked_add_days(step);

    while let Some(date) = current {
        if date > config.horizon {
            break;
        }

        let age = Age::between(config.birth_date, date);
        let days_since_weight = (date - last_weight.date).num_days() as f64;
        let days_since_height = (date - last_height.date).num_days() as f64;

        let predicted_weight =
            last_weight.value + days_since_weight / 7.0 * weight_rates.rate_at(age.weeks);
        let predicted_height =
            last_height.value + days_since_height / 7.0 * height_rates.rate_at(age.weeks);

        let weight_row = weight_table.row_at(age.weeks as f64);
        let height_row = height_table.row_at(age.weeks as f64);

        let record = PredictionRecord {
            date,
            predicted_weight,
            predicted_height,
            weight_percentile: Percentile::rank(predicted_weight, &weight_row),
            height_percentile: Percentile::rank(predicted_height, &height_row),
            who50th_weight: weight_row.median(),
            who50th_height: height_row.median(),
            age_weeks: age.weeks,
            age_months: age.months,
        };

        let crossed = record.crosses(&config.threshold);
        records.push(record);
        if crossed {
            break;
        }

        current = date.checked_add_days(step);
    }

    Ok(records)
}

/// First record that reaches the threshold
pub fn first_crossing<'a>(
    records: &'a [PredictionRecord],
    threshold: &SafetyThreshold,
) -> Option<&'a PredictionRecord> {
    records.iter().find(|r| r.crosses(threshold))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Measurement;
    use proptest::prelude::*;

    proptest! {
        /// Property: forecasts are weekly, bounded and stop at the first crossing
        #[test]
        fn test_forecast_shape(
            weight_offset in 0u64..400,
            height_offset in 0u64..400,
            weight in 2.0f64..14.0,
            height in 45.0f64..85.0,
        ) {
            let birth = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let mut pair = SeriesPair::empty();
            pair.weight.insert(Measurement::new(birth + Days::new(weight_offset), weight).unwrap());
            pair.height.insert(Measurement::new(birth + Days::new(height_offset), height).unwrap());

            let config = PredictionConfig::new(birth, birth);
            let records = predict(&pair, &config).unwrap();

            prop_assert!(records.len() <= 105);
            for w in records.windows(2) {
                prop_assert_eq!((w[1].date - w[0].date).num_days(), 7);
            }
            if let Some(first) = records.first() {
                let anchor = (birth + Days::new(weight_offset.max(height_offset))) + Days::new(7);
                prop_assert_eq!(first.date, anchor);
            }
            prop_assert!(records.iter().all(|r| r.date <= config.horizon));

            let crossings = records.iter().filter(|r| r.crosses(&config.threshold)).count();
            prop_assert!(crossings <= 1);
            if crossings == 1 {
                prop_assert!(records.last().unwrap().crosses(&config.threshold));
            }
        }
    }
}
