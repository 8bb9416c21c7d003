//! Measurement series - observed weight and height readings

use crate::{DomainError, Metric};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed weight or height reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Calendar day of the reading
    pub date: NaiveDate,

    /// Reading in the metric's unit (kg or cm)
    pub value: f64,
}

impl Measurement {
    /// Create a measurement
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidMeasurement`] unless `value` is finite and positive
    pub fn new(date: NaiveDate, value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidMeasurement(format!(
                "value on {} must be a positive number, got {}",
                date, value
            )));
        }

        Ok(Self { date, value })
    }
}

/// Readings for one metric, ascending by date
///
/// Equal dates are allowed and keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Measurement>", try_from = "Vec<Measurement>")]
pub struct MeasurementSeries {
    entries: Vec<Measurement>,
}

impl MeasurementSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from readings in any order
    pub fn from_entries(mut entries: Vec<Measurement>) -> Self {
        entries.sort_by_key(|m| m.date);
        Self { entries }
    }

    /// The bundled historical dataset for a metric
    pub fn default_for(metric: Metric) -> Self {
        let raw: &[((i32, u32, u32), f64)] = match metric {
            Metric::Weight => DEFAULT_WEIGHTS,
            Metric::Height => DEFAULT_HEIGHTS,
        };

        Self::from_entries(
            raw.iter()
                .filter_map(|&((y, m, d), value)| {
                    NaiveDate::from_ymd_opt(y, m, d).map(|date| Measurement { date, value })
                })
                .collect(),
        )
    }

    /// Add a reading and restore date order
    pub fn insert(&mut self, measurement: Measurement) {
        self.entries.push(measurement);
        // Stable sort keeps insertion order for equal dates
        self.entries.sort_by_key(|m| m.date);
    }

    /// Remove the reading at `index`
    ///
    /// # Errors
    /// Returns [`DomainError::IndexOutOfRange`] when `index >= len()`
    pub fn remove(&mut self, index: usize) -> Result<Measurement, DomainError> {
        if index >= self.entries.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        Ok(self.entries.remove(index))
    }

    /// Replace the contents with the bundled dataset for `metric`
    pub fn reset(&mut self, metric: Metric) {
        *self = Self::default_for(metric);
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&Measurement> {
        self.entries.last()
    }

    /// Reading at a position
    pub fn get(&self, index: usize) -> Option<&Measurement> {
        self.entries.get(index)
    }

    /// First reading taken on `date`
    pub fn find_on(&self, date: NaiveDate) -> Option<&Measurement> {
        self.entries.iter().find(|m| m.date == date)
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no readings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate readings in date order
    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.entries.iter()
    }
}

impl From<MeasurementSeries> for Vec<Measurement> {
    fn from(series: MeasurementSeries) -> Self {
        series.entries
    }
}

impl TryFrom<Vec<Measurement>> for MeasurementSeries {
    type Error = DomainError;

    fn try_from(entries: Vec<Measurement>) -> Result<Self, Self::Error> {
        let entries = entries
            .into_iter()
            .map(|m| Measurement::new(m.date, m.value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_entries(entries))
    }
}

impl<'a> IntoIterator for &'a MeasurementSeries {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Weight and height histories for the tracked subject
///
/// Serializes as `{"weight": [...], "height": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPair {
    /// Weight readings in kg
    pub weight: MeasurementSeries,

    /// Height readings in cm
    pub height: MeasurementSeries,
}

impl SeriesPair {
    /// A pair with no readings
    pub fn empty() -> Self {
        Self {
            weight: MeasurementSeries::new(),
            height: MeasurementSeries::new(),
        }
    }

    /// Series for a metric
    pub fn series(&self, metric: Metric) -> &MeasurementSeries {
        match metric {
            Metric::Weight => &self.weight,
            Metric::Height => &self.height,
        }
    }

    /// Mutable series for a metric
    pub fn series_mut(&mut self, metric: Metric) -> &mut MeasurementSeries {
        match metric {
            Metric::Weight => &mut self.weight,
            Metric::Height => &mut self.height,
        }
    }

    /// Record a visit: each supplied value is added to its series
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidMeasurement`] when neither value is given
    /// or a given value is not positive. Nothing is recorded on error.
    pub fn record(
        &mut self,
        date: NaiveDate,
        weight: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), DomainError> {
        if weight.is_none() && height.is_none() {
            return Err(DomainError::InvalidMeasurement(
                "at least one of weight or height is required".to_string(),
            ));
        }

        let weight = weight.map(|v| Measurement::new(date, v)).transpose()?;
        let height = height.map(|v| Measurement::new(date, v)).transpose()?;

        if let Some(m) = weight {
            self.weight.insert(m);
        }
        if let Some(m) = height {
            self.height.insert(m);
        }

        Ok(())
    }

    /// Replace both series with the bundled dataset
    pub fn reset(&mut self) {
        self.weight.reset(Metric::Weight);
        self.height.reset(Metric::Height);
    }
}

impl Default for SeriesPair {
    fn default() -> Self {
        Self {
            weight: MeasurementSeries::default_for(Metric::Weight),
            height: MeasurementSeries::default_for(Metric::Height),
        }
    }
}

/// Birth date belonging to the bundled dataset
pub fn default_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 7).unwrap_or_default()
}

const DEFAULT_WEIGHTS: &[((i32, u32, u32), f64)] = &[
    ((2025, 5, 7), 3.215),
    ((2025, 5, 10), 2.95),
    ((2025, 5, 13), 3.17),
    ((2025, 5, 16), 3.38),
    ((2025, 5, 21), 3.47),
    ((2025, 5, 25), 3.63),
    ((2025, 5, 27), 3.73),
    ((2025, 5, 31), 3.95),
    ((2025, 6, 2), 4.05),
    ((2025, 6, 8), 4.27),
    ((2025, 6, 11), 4.47),
    ((2025, 6, 15), 4.66),
    ((2025, 6, 19), 4.79),
    ((2025, 7, 1), 5.28),
    ((2025, 7, 6), 5.44),
];

const DEFAULT_HEIGHTS: &[((i32, u32, u32), f64)] = &[
    ((2025, 5, 7), 54.0),
    ((2025, 5, 28), 56.0),
    ((2025, 6, 11), 59.0),
    ((2025, 7, 1), 61.0),
];
