//! Reset command implementation.

use super::{confirm, persist};
use crate::cli::ResetArgs;
use crate::error::Result;
use crate::output::Formatter;
use growthline_domain::traits::MeasurementStore;
use growthline_domain::SeriesPair;
use std::fmt::Display;

/// Execute the reset command.
pub fn execute_reset<S>(
    args: ResetArgs,
    series: &mut SeriesPair,
    store: &mut S,
    formatter: &Formatter,
) -> Result<()>
where
    S: MeasurementStore,
    S::Error: Display,
{
    if !args.yes {
        let prompt = "Reset to the default historical data? This deletes all custom measurements.";
        if !confirm(prompt)? {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    series.reset();

    // Drop the old document, then store the defaults so the save time moves
    if let Err(e) = store.clear() {
        tracing::warn!("Failed to clear saved measurements: {}", e);
        eprintln!(
            "{}",
            formatter.warning(&format!("Failed to clear saved measurements: {}", e))
        );
    }

    if persist(store, series, formatter) {
        println!("{}", formatter.success("Measurements reset to the default dataset"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FailingStore;
    use crate::config::OutputFormat;
    use growthline_store::{load_or_default, SqliteStore};

    #[test]
    fn test_reset_saves_defaults() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let mut series = SeriesPair::empty();
        store.save(&series).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_reset(ResetArgs { yes: true }, &mut series, &mut store, &formatter).unwrap();

        assert_eq!(series, SeriesPair::default());
        assert_eq!(store.load().unwrap(), Some(SeriesPair::default()));
        assert!(store.last_saved().unwrap().is_some());
        assert_eq!(load_or_default(&store), SeriesPair::default());
    }

    #[test]
    fn test_reset_survives_store_failure() {
        let mut series = SeriesPair::empty();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_reset(ResetArgs { yes: true }, &mut series, &mut FailingStore, &formatter);

        assert!(result.is_ok());
        assert_eq!(series, SeriesPair::default());
    }
}
