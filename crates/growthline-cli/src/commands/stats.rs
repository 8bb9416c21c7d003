//! Stats command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use chrono::{DateTime, Local, NaiveDate, Utc};
use growthline_domain::{current_stats, SeriesPair};

/// Execute the stats command.
///
/// `last_saved` is shown under the table when known.
pub fn execute_stats(
    series: &SeriesPair,
    config: &Config,
    formatter: &Formatter,
    today: NaiveDate,
    last_saved: Option<DateTime<Utc>>,
) -> Result<()> {
    let stats = current_stats(series, config.subject.birth_date, today)?;
    println!("{}", formatter.format_stats(&stats)?);

    if formatter.is_table() {
        if let Some(saved) = last_saved {
            let local = saved.with_timezone(&Local);
            println!(
                "{}",
                formatter.info(&format!("Last saved: {}", local.format("%Y-%m-%d %H:%M")))
            );
        }
    }
    Ok(())
}
