//! Growth timeline - actual readings merged with the forecast for charting

use crate::{Age, PredictionRecord, SeriesPair};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Forecast points included in a timeline by default (one year of weeks)
pub const DEFAULT_TIMELINE_WEEKS: usize = 52;

/// Origin of a timeline point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// Observed reading
    Actual,
    /// Forecast value
    Predicted,
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Weight on that day, if any
    pub weight: Option<f64>,
    /// Height on that day, if any
    pub height: Option<f64>,
    /// Observed or forecast
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Age in whole weeks
    pub age_weeks: i64,
}

/// Merge observed readings and the first `limit` forecast records
///
/// Every distinct measured date yields one actual point carrying whichever
/// readings exist on that day. Forecast points follow in their own order.
pub fn timeline(
    series: &SeriesPair,
    predictions: &[PredictionRecord],
    birth_date: NaiveDate,
    limit: usize,
) -> Vec<TimelinePoint> {
    let dates: BTreeSet<NaiveDate> = series
        .weight
        .iter()
        .chain(series.height.iter())
        .map(|m| m.date)
        .collect();

    let actual = dates.into_iter().map(|date| TimelinePoint {
        date,
        weight: series.weight.find_on(date).map(|m| m.value),
        height: series.height.find_on(date).map(|m| m.value),
        kind: PointKind::Actual,
        age_weeks: Age::between(birth_date, date).weeks,
    });

    let predicted = predictions.iter().take(limit).map(|p| TimelinePoint {
        date: p.date,
        weight: Some(p.predicted_weight),
        height: Some(p.predicted_height),
        kind: PointKind::Predicted,
        age_weeks: p.age_weeks,
    });

    actual.chain(predicted).collect()
}
