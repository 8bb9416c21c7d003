//! Growthline CLI - infant growth forecasts from the command line.

use chrono::Local;
use clap::Parser;
use growthline_cli::cli::PredictArgs;
use growthline_cli::commands;
use growthline_cli::{Cli, Command, Config, Formatter};
use growthline_store::{load_or_default, SqliteStore};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> growthline_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Explicit config files must load; the default one falls back to defaults
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Could not load config, using defaults: {}", e);
            Config::default()
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let database = config.database_path()?;
    debug!("Using database {}", database.display());
    let mut store = SqliteStore::new(&database)?;
    let mut series = load_or_default(&store);
    let today = Local::now().date_naive();

    match cli.command {
        None => {
            commands::execute_predict(PredictArgs::default(), &series, &config, &formatter, today)?;
        }
        Some(Command::Predict(args)) => {
            commands::execute_predict(args, &series, &config, &formatter, today)?;
        }
        Some(Command::Stats) => {
            let last_saved = store.last_saved().unwrap_or_else(|e| {
                warn!("Could not read save time: {}", e);
                None
            });
            commands::execute_stats(&series, &config, &formatter, today, last_saved)?;
        }
        Some(Command::List(args)) => {
            commands::execute_list(args, &series, &formatter)?;
        }
        Some(Command::Add(args)) => {
            commands::execute_add(args, &mut series, &mut store, &formatter, today)?;
        }
        Some(Command::Delete(args)) => {
            commands::execute_delete(args, &mut series, &mut store, &formatter)?;
        }
        Some(Command::Reset(args)) => {
            commands::execute_reset(args, &mut series, &mut store, &formatter)?;
        }
        Some(Command::Timeline(args)) => {
            commands::execute_timeline(args, &series, &config, &formatter, today)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
