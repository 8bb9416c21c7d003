//! Delete command implementation.

use super::{confirm, persist};
use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::output::Formatter;
use growthline_domain::traits::MeasurementStore;
use growthline_domain::{DomainError, Metric, SeriesPair};
use std::fmt::Display;

/// Execute the delete command.
pub fn execute_delete<S>(
    args: DeleteArgs,
    series: &mut SeriesPair,
    store: &mut S,
    formatter: &Formatter,
) -> Result<()>
where
    S: MeasurementStore,
    S::Error: Display,
{
    let metric: Metric = args.metric.into();
    let target = series.series(metric);
    let measurement = *target.get(args.index).ok_or(DomainError::IndexOutOfRange {
        index: args.index,
        len: target.len(),
    })?;

    // Confirm deletion unless --yes is specified
    if !args.yes {
        let prompt = format!(
            "Delete {} measurement {} {} from {}?",
            metric,
            measurement.value,
            metric.unit(),
            measurement.date
        );
        if !confirm(&prompt)? {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    series.series_mut(metric).remove(args.index)?;

    if persist(store, series, formatter) {
        println!(
            "{}",
            formatter.success(&format!("Deleted {} measurement from {}", metric, measurement.date))
        );
    }
    Ok(())
}
