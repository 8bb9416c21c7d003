//! Age calculator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average month length in days
///
/// Months are an approximation, not calendar-month arithmetic.
pub const AVERAGE_MONTH_DAYS: f64 = 30.44;

/// Elapsed age between a birth date and a target date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    /// Whole days elapsed
    pub days: i64,
    /// `floor(days / 7)`
    pub weeks: i64,
    /// `floor(days / 30.44)`
    pub months: i64,
}

impl Age {
    /// Compute the age at `target` for someone born on `start`
    ///
    /// Targets before `start` yield negative components (floored toward
    /// negative infinity). Such ages must not be fed to the reference tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use growthline_domain::Age;
    ///
    /// let birth = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
    /// let visit = NaiveDate::from_ymd_opt(2025, 7, 13).unwrap();
    /// let age = Age::between(birth, visit);
    /// assert_eq!((age.days, age.weeks, age.months), (67, 9, 2));
    /// ```
    pub fn between(start: NaiveDate, target: NaiveDate) -> Self {
        let days = (target - start).num_days();
        Self {
            days,
            weeks: days.div_euclid(7),
            months: (days as f64 / AVERAGE_MONTH_DAYS).floor() as i64,
        }
    }
}
