//! Timeline command implementation.

use crate::cli::TimelineArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use chrono::NaiveDate;
use growthline_domain::{predict, timeline, SeriesPair};

/// Execute the timeline command.
pub fn execute_timeline(
    args: TimelineArgs,
    series: &SeriesPair,
    config: &Config,
    formatter: &Formatter,
    today: NaiveDate,
) -> Result<()> {
    let prediction = config.prediction_config(today);
    let records = predict(series, &prediction)?;
    let weeks = args.weeks.unwrap_or(config.forecast.chart_weeks);

    let points = timeline(series, &records, prediction.birth_date, weeks);
    println!("{}", formatter.format_timeline(&points)?);
    Ok(())
}
