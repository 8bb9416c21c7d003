//! Command implementations.

pub mod add;
pub mod delete;
pub mod list;
pub mod predict;
pub mod reset;
pub mod stats;
pub mod timeline;

pub use self::add::execute_add;
pub use self::delete::execute_delete;
pub use self::list::execute_list;
pub use self::predict::execute_predict;
pub use self::reset::execute_reset;
pub use self::stats::execute_stats;
pub use self::timeline::execute_timeline;

use crate::error::Result;
use crate::output::Formatter;
use growthline_domain::traits::MeasurementStore;
use growthline_domain::SeriesPair;
use std::fmt::Display;
use std::io::{self, Write};

/// Save the history, reporting failure as a warning instead of an error.
///
/// Returns whether the save succeeded.
pub fn persist<S>(store: &mut S, series: &SeriesPair, formatter: &Formatter) -> bool
where
    S: MeasurementStore,
    S::Error: Display,
{
    match store.save(series) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to save measurements: {}", e);
            eprintln!(
                "{}",
                formatter.warning(&format!("Failed to save measurements locally: {}", e))
            );
            false
        }
    }
}

/// Ask a yes/no question on stdin; anything but `y` declines.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

/// Store whose writes always fail.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl MeasurementStore for FailingStore {
    type Error = String;

    fn load(&self) -> std::result::Result<Option<SeriesPair>, Self::Error> {
        Ok(None)
    }

    fn save(&mut self, _series: &SeriesPair) -> std::result::Result<(), Self::Error> {
        Err("disk full".to_string())
    }

    fn clear(&mut self) -> std::result::Result<(), Self::Error> {
        Err("disk full".to_string())
    }
}
