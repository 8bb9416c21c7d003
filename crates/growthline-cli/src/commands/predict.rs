//! Predict command implementation.

use crate::cli::PredictArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use chrono::NaiveDate;
use growthline_domain::{first_crossing, predict, SeriesPair};
use tracing::debug;

/// Execute the predict command.
pub fn execute_predict(
    args: PredictArgs,
    series: &SeriesPair,
    config: &Config,
    formatter: &Formatter,
    today: NaiveDate,
) -> Result<()> {
    let prediction = config.prediction_config(today);
    let records = predict(series, &prediction)?;
    debug!(
        "Generated {} forecast records up to {}",
        records.len(),
        prediction.horizon
    );

    let shown = match args.limit {
        Some(limit) => &records[..limit.min(records.len())],
        None => &records[..],
    };
    println!("{}", formatter.format_predictions(shown, &prediction.threshold)?);

    if formatter.is_table() {
        let crossing = first_crossing(&records, &prediction.threshold);
        println!();
        println!("{}", formatter.crossing_summary(crossing, &prediction.threshold));
    }

    Ok(())
}
