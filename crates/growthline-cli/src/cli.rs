//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Growthline - infant growth forecasts against WHO percentile curves.
#[derive(Debug, Parser)]
#[command(name = "growthline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GROWTHLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Forecast weekly growth until the car-seat limit (default)
    Predict(PredictArgs),

    /// Show the latest readings and their percentiles today
    Stats,

    /// List recorded measurements
    List(ListArgs),

    /// Record a new measurement
    Add(AddArgs),

    /// Delete a measurement by index
    Delete(DeleteArgs),

    /// Reset to the bundled historical dataset
    Reset(ResetArgs),

    /// Actual readings merged with the forecast, for charting
    Timeline(TimelineArgs),
}

/// Arguments for the predict command.
#[derive(Debug, Default, Parser)]
pub struct PredictArgs {
    /// Show at most this many forecast weeks
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only list one metric
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Measurement date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Weight in kg
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// Height in cm
    #[arg(short = 'H', long)]
    pub height: Option<f64>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Series to delete from
    #[arg(value_enum)]
    pub metric: MetricArg,

    /// Position shown by `list`
    pub index: usize,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the reset command.
#[derive(Debug, Parser)]
pub struct ResetArgs {
    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the timeline command.
#[derive(Debug, Parser)]
pub struct TimelineArgs {
    /// Forecast weeks to include (defaults to the configured chart_weeks)
    #[arg(short, long)]
    pub weeks: Option<usize>,
}

/// Metric argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MetricArg {
    /// Weight series (kg)
    Weight,
    /// Height series (cm)
    Height,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<MetricArg> for growthline_domain::Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Weight => growthline_domain::Metric::Weight,
            MetricArg::Height => growthline_domain::Metric::Height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["growthline"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_command() {
        let cli = Cli::parse_from([
            "growthline",
            "add",
            "--date",
            "2025-07-20",
            "--weight",
            "5.9",
            "-H",
            "62.5",
        ]);
        match cli.command {
            Some(Command::Add(args)) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 7, 20));
                assert_eq!(args.weight, Some(5.9));
                assert_eq!(args.height, Some(62.5));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_delete_command() {
        let cli = Cli::parse_from(["growthline", "delete", "height", "2", "-y"]);
        match cli.command {
            Some(Command::Delete(args)) => {
                assert_eq!(args.metric, MetricArg::Height);
                assert_eq!(args.index, 2);
                assert!(args.yes);
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = Cli::try_parse_from(["growthline", "add", "--date", "2025-13-01", "-w", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["growthline", "predict", "--format", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_metric_conversion() {
        let metric: growthline_domain::Metric = MetricArg::Weight.into();
        assert_eq!(metric, growthline_domain::Metric::Weight);
    }
}
