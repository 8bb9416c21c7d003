//! Add command implementation.

use super::persist;
use crate::cli::AddArgs;
use crate::error::Result;
use crate::output::Formatter;
use chrono::NaiveDate;
use growthline_domain::traits::MeasurementStore;
use growthline_domain::SeriesPair;
use std::fmt::Display;

/// Execute the add command.
pub fn execute_add<S>(
    args: AddArgs,
    series: &mut SeriesPair,
    store: &mut S,
    formatter: &Formatter,
    today: NaiveDate,
) -> Result<()>
where
    S: MeasurementStore,
    S::Error: Display,
{
    let date = args.date.unwrap_or(today);
    series.record(date, args.weight, args.height)?;

    let mut recorded = Vec::new();
    if let Some(weight) = args.weight {
        recorded.push(format!("{} kg", weight));
    }
    if let Some(height) = args.height {
        recorded.push(format!("{} cm", height));
    }

    if persist(store, series, formatter) {
        println!(
            "{}",
            formatter.success(&format!("Recorded {} on {}", recorded.join(", "), date))
        );
    }
    Ok(())
}
