//! WHO percentile reference tables, the age interpolator and the
//! percentile finder.
//!
//! Reference rows hold the 3rd, 15th, 50th, 85th and 97th percentile values
//! of a metric at a given age in weeks. Between breakpoints each percentile
//! is interpolated linearly; outside the covered range rows are clamped.

use crate::Metric;
use serde::{Serialize, Serializer};
use std::fmt;

/// Percentile rank labels for the five columns of a [`PercentileRow`]
pub const PERCENTILE_RANKS: [u8; 5] = [3, 15, 50, 85, 97];

/// Reference values at the ranks in [`PERCENTILE_RANKS`]
///
/// Values are expected to be non-decreasing; [`Percentile::rank`] guards
/// against rows that are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileRow(pub [f64; 5]);

impl PercentileRow {
    /// The 50th percentile (median) reference value
    pub fn median(&self) -> f64 {
        self.0[2]
    }
}

/// Age-in-weeks breakpoints mapped to reference rows
#[derive(Debug, Clone, Copy)]
pub struct PercentileTable<'a> {
    breakpoints: &'a [(u32, PercentileRow)],
}

impl<'a> PercentileTable<'a> {
    /// The bundled WHO table for a metric
    pub fn who(metric: Metric) -> PercentileTable<'static> {
        match metric {
            Metric::Weight => WHO_WEIGHT,
            Metric::Height => WHO_HEIGHT,
        }
    }

    /// Breakpoints in ascending age order
    pub fn breakpoints(&self) -> &'a [(u32, PercentileRow)] {
        self.breakpoints
    }

    /// Reference row at an arbitrary age
    ///
    /// Ages at or below the first breakpoint return the first row, ages at or
    /// above the last return the last row. An age equal to a breakpoint
    /// returns that row unchanged.
    pub fn row_at(&self, age_weeks: f64) -> PercentileRow {
        let (first_week, first_row) = self.breakpoints[0];
        let (last_week, last_row) = self.breakpoints[self.breakpoints.len() - 1];

        if age_weeks <= f64::from(first_week) {
            return first_row;
        }
        if age_weeks >= f64::from(last_week) {
            return last_row;
        }

        for pair in self.breakpoints.windows(2) {
            let (lo_week, lo) = pair[0];
            let (hi_week, hi) = pair[1];
            let (lo_week, hi_week) = (f64::from(lo_week), f64::from(hi_week));

            if age_weeks >= lo_week && age_weeks <= hi_week {
                let ratio = (age_weeks - lo_week) / (hi_week - lo_week);
                return PercentileRow(std::array::from_fn(|j| {
                    lo.0[j] + ratio * (hi.0[j] - lo.0[j])
                }));
            }
        }

        // Only reachable for NaN ages
        last_row
    }
}

/// Where a value falls relative to a reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percentile {
    /// At or below the 3rd percentile value
    BelowRange,
    /// Interpolated rank, rounded to the nearest integer
    Rank(u8),
    /// At or above the 97th percentile value
    AboveRange,
    /// No bracket contains the value (NaN input)
    Undetermined,
}

impl Percentile {
    /// Inverse-interpolate `value` against `row`
    ///
    /// # Examples
    ///
    /// ```
    /// use growthline_domain::{Percentile, PercentileRow};
    ///
    /// let row = PercentileRow([2.5, 2.9, 3.3, 3.9, 4.4]);
    /// assert_eq!(Percentile::rank(3.3, &row), Percentile::Rank(50));
    /// assert_eq!(Percentile::rank(2.0, &row).to_string(), "<3");
    /// ```
    pub fn rank(value: f64, row: &PercentileRow) -> Self {
        let v = &row.0;

        if value <= v[0] {
            return Percentile::BelowRange;
        }
        if value >= v[4] {
            return Percentile::AboveRange;
        }

        for i in 0..4 {
            if value >= v[i] && value <= v[i + 1] {
                let span = v[i + 1] - v[i];
                if span <= 0.0 {
                    return Percentile::Rank(PERCENTILE_RANKS[i]);
                }

                let ratio = (value - v[i]) / span;
                let lo_rank = f64::from(PERCENTILE_RANKS[i]);
                let hi_rank = f64::from(PERCENTILE_RANKS[i + 1]);
                let rank = lo_rank + ratio * (hi_rank - lo_rank);
                return Percentile::Rank(rank.round() as u8);
            }
        }

        Percentile::Undetermined
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentile::BelowRange => f.write_str("<3"),
            Percentile::Rank(rank) => write!(f, "{}", rank),
            Percentile::AboveRange => f.write_str(">97"),
            Percentile::Undetermined => f.write_str("N/A"),
        }
    }
}

// Ranks serialize as numbers, sentinels as their display strings
impl Serialize for Percentile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Percentile::Rank(rank) => serializer.serialize_u8(*rank),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

const fn row(values: [f64; 5]) -> PercentileRow {
    PercentileRow(values)
}

/// WHO weight-for-age reference (kg), birth to 52 weeks
pub static WHO_WEIGHT: PercentileTable<'static> = PercentileTable {
    breakpoints: &[
        (0, row([2.5, 2.9, 3.3, 3.9, 4.4])),
        (4, row([3.4, 3.9, 4.5, 5.1, 5.8])),
        (8, row([4.3, 4.9, 5.6, 6.3, 7.1])),
        (13, row([5.0, 5.7, 6.6, 7.5, 8.5])),
        (17, row([5.6, 6.3, 7.3, 8.3, 9.3])),
        (22, row([6.0, 6.9, 7.9, 9.0, 10.1])),
        (26, row([6.4, 7.3, 8.4, 9.6, 10.7])),
        (30, row([6.7, 7.6, 8.8, 10.0, 11.2])),
        (35, row([7.0, 7.9, 9.2, 10.5, 11.7])),
        (39, row([7.2, 8.2, 9.5, 10.9, 12.2])),
        (43, row([7.4, 8.4, 9.8, 11.2, 12.6])),
        (48, row([7.7, 8.7, 10.1, 11.6, 13.0])),
        (52, row([7.9, 8.9, 10.3, 11.9, 13.3])),
    ],
};

/// WHO length-for-age reference (cm), birth to 52 weeks
pub static WHO_HEIGHT: PercentileTable<'static> = PercentileTable {
    breakpoints: &[
        (0, row([46.1, 47.8, 49.9, 52.0, 53.7])),
        (4, row([50.8, 52.8, 54.7, 56.7, 58.6])),
        (8, row([54.4, 56.4, 58.4, 60.4, 62.4])),
        (13, row([57.3, 59.4, 61.4, 63.5, 65.5])),
        (17, row([59.7, 61.8, 63.9, 66.0, 68.0])),
        (22, row([61.7, 63.8, 65.9, 68.0, 70.1])),
        (26, row([63.3, 65.5, 67.6, 69.8, 71.9])),
        (30, row([64.8, 67.0, 69.2, 71.3, 73.5])),
        (35, row([66.2, 68.4, 70.6, 72.8, 75.0])),
        (39, row([67.5, 69.7, 72.0, 74.2, 76.5])),
        (43, row([68.7, 71.0, 73.3, 75.5, 77.8])),
        (48, row([69.9, 72.2, 74.5, 76.9, 79.1])),
        (52, row([71.0, 73.4, 75.7, 78.1, 80.5])),
    ],
};

#[cfg(test)]
fn is_monotonic(row: &PercentileRow) -> bool {
    row.0.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_are_well_formed() {
        for metric in [Metric::Weight, Metric::Height] {
            let table = PercentileTable::who(metric);
            let weeks: Vec<u32> = table.breakpoints().iter().map(|(w, _)| *w).collect();
            assert_eq!(weeks.first(), Some(&0));
            assert_eq!(weeks.last(), Some(&52));
            assert!(weeks.windows(2).all(|w| w[0] < w[1]));
            assert!(table.breakpoints().iter().all(|(_, r)| is_monotonic(r)));
        }
    }

    #[test]
    fn test_clamps_below_and_above_range() {
        let table = PercentileTable::who(Metric::Weight);
        assert_eq!(table.row_at(-3.0), table.breakpoints()[0].1);
        assert_eq!(table.row_at(0.0), table.breakpoints()[0].1);
        assert_eq!(table.row_at(52.0), table.breakpoints()[12].1);
        assert_eq!(table.row_at(104.0), table.breakpoints()[12].1);
    }

    #[test]
    fn test_exact_breakpoint_returns_row() {
        let table = PercentileTable::who(Metric::Height);
        assert_eq!(table.row_at(13.0), row([57.3, 59.4, 61.4, 63.5, 65.5]));
        assert_eq!(table.row_at(26.0), row([63.3, 65.5, 67.6, 69.8, 71.9]));
    }

    #[test]
    fn test_interpolates_between_breakpoints() {
        let table = PercentileTable::who(Metric::Weight);
        // Midway between week 0 and week 4
        let mid = table.row_at(2.0);
        let expected = [2.95, 3.4, 3.9, 4.5, 5.1];
        for (got, want) in mid.0.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_custom_table() {
        let points = [(10, row([1.0, 2.0, 3.0, 4.0, 5.0])), (20, row([3.0, 4.0, 5.0, 6.0, 7.0]))];
        let table = PercentileTable { breakpoints: &points };
        assert_eq!(table.row_at(15.0), row([2.0, 3.0, 4.0, 5.0, 6.0]));
        assert_eq!(table.row_at(5.0).median(), 3.0);
    }

    #[test]
    fn test_rank_sentinels() {
        let r = row([2.5, 2.9, 3.3, 3.9, 4.4]);
        assert_eq!(Percentile::rank(2.5, &r), Percentile::BelowRange);
        assert_eq!(Percentile::rank(1.0, &r), Percentile::BelowRange);
        assert_eq!(Percentile::rank(4.4, &r), Percentile::AboveRange);
        assert_eq!(Percentile::rank(9.0, &r), Percentile::AboveRange);
        assert_eq!(Percentile::BelowRange.to_string(), "<3");
        assert_eq!(Percentile::AboveRange.to_string(), ">97");
    }

    #[test]
    fn test_rank_at_inner_labels() {
        let r = row([2.5, 2.9, 3.3, 3.9, 4.4]);
        assert_eq!(Percentile::rank(2.9, &r), Percentile::Rank(15));
        assert_eq!(Percentile::rank(3.3, &r), Percentile::Rank(50));
        assert_eq!(Percentile::rank(3.9, &r), Percentile::Rank(85));
    }

    #[test]
    fn test_rank_interpolates_and_rounds() {
        let r = row([2.5, 2.9, 3.3, 3.9, 4.4]);
        // Halfway between 50th (3.3) and 85th (3.9) -> 67.5 -> 68
        assert_eq!(Percentile::rank(3.6, &r), Percentile::Rank(68));
        // A quarter of the way from 3rd to 15th -> 6
        assert_eq!(Percentile::rank(2.6, &r), Percentile::Rank(6));
    }

    #[test]
    fn test_flat_segment_does_not_divide_by_zero() {
        let r = row([1.0, 2.0, 2.0, 2.0, 4.0]);
        assert_eq!(Percentile::rank(2.0, &r), Percentile::Rank(15));
        assert_eq!(Percentile::rank(3.0, &r), Percentile::Rank(91));
    }

    #[test]
    fn test_non_monotonic_row_still_ranks() {
        let r = row([1.0, 5.0, 2.0, 3.0, 6.0]);
        assert_eq!(Percentile::rank(4.0, &r), Percentile::Rank(12));
    }

    #[test]
    fn test_nan_is_undetermined() {
        let r = row([2.5, 2.9, 3.3, 3.9, 4.4]);
        assert_eq!(Percentile::rank(f64::NAN, &r), Percentile::Undetermined);
        assert_eq!(Percentile::Undetermined.to_string(), "N/A");
    }

    #[test]
    fn test_percentile_serialization() {
        assert_eq!(serde_json::to_string(&Percentile::Rank(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&Percentile::AboveRange).unwrap(), "\">97\"");
    }
}
