//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use growthline_domain::SeriesPair;

/// Execute the list command.
pub fn execute_list(args: ListArgs, series: &SeriesPair, formatter: &Formatter) -> Result<()> {
    let only = args.metric.map(Into::into);
    println!("{}", formatter.format_series(series, only)?);
    Ok(())
}
