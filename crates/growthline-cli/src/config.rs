//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use chrono::NaiveDate;
use growthline_domain::prediction::{horizon_after, DEFAULT_HORIZON_MONTHS};
use growthline_domain::{default_birth_date, PredictionConfig, SafetyThreshold, DEFAULT_TIMELINE_WEEKS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// The tracked child
    #[serde(default)]
    pub subject: Subject,

    /// Car-seat limits
    #[serde(default)]
    pub limits: Limits,

    /// Forecast window
    #[serde(default)]
    pub forecast: Forecast,

    /// Where measurements are kept
    #[serde(default)]
    pub storage: Storage,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Subject details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Birth date (YYYY-MM-DD)
    #[serde(default = "default_birth_date")]
    pub birth_date: NaiveDate,
}

/// Safety limits that end a forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum weight in kg
    #[serde(default = "default_weight_limit")]
    pub weight_kg: f64,

    /// Maximum height in cm
    #[serde(default = "default_height_limit")]
    pub height_cm: f64,
}

/// Forecast window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Months past today to forecast
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,

    /// Forecast weeks included in the timeline
    #[serde(default = "default_chart_weeks")]
    pub chart_weeks: usize,
}

/// Storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storage {
    /// SQLite database path (defaults to ~/.growthline/growthline.db)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and default database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".growthline"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, defaulting if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Database path, creating its directory if needed.
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.storage.database {
            Some(path) => path.clone(),
            None => Self::home()?.join("growthline.db"),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Configured car-seat limits.
    pub fn threshold(&self) -> SafetyThreshold {
        SafetyThreshold {
            weight_limit: self.limits.weight_kg,
            height_limit: self.limits.height_cm,
        }
    }

    /// Prediction inputs for a run on `today`.
    pub fn prediction_config(&self, today: NaiveDate) -> PredictionConfig {
        PredictionConfig::new(self.subject.birth_date, today)
            .with_threshold(self.threshold())
            .with_horizon(horizon_after(today, self.forecast.horizon_months))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            subject: Subject::default(),
            limits: Limits::default(),
            forecast: Forecast::default(),
            storage: Storage::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            birth_date: default_birth_date(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        let threshold = SafetyThreshold::default();
        Self {
            weight_kg: threshold.weight_limit,
            height_cm: threshold.height_limit,
        }
    }
}

impl Default for Forecast {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            chart_weeks: DEFAULT_TIMELINE_WEEKS,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_weight_limit() -> f64 {
    SafetyThreshold::default().weight_limit
}

fn default_height_limit() -> f64 {
    SafetyThreshold::default().height_limit
}

fn default_horizon_months() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

fn default_chart_weeks() -> usize {
    DEFAULT_TIMELINE_WEEKS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.subject.birth_date, NaiveDate::from_ymd_opt(2025, 5, 7).unwrap());
        assert_eq!(config.threshold(), SafetyThreshold::default());
        assert_eq!(config.forecast.horizon_months, 24);
        assert_eq!(config.forecast.chart_weeks, 52);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [subject]
            birth_date = "2024-11-02"

            [limits]
            weight_kg = 18.0
            "#,
        )
        .unwrap();

        assert_eq!(config.subject.birth_date, NaiveDate::from_ymd_opt(2024, 11, 2).unwrap());
        assert_eq!(config.limits.weight_kg, 18.0);
        assert_eq!(config.limits.height_cm, 81.0);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.storage.database = Some(dir.path().join("data.db"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.storage.database, Some(dir.path().join("data.db")));
        assert_eq!(loaded.database_path().unwrap(), dir.path().join("data.db"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.forecast.horizon_months, 24);
    }

    #[test]
    fn test_prediction_config_uses_horizon_setting() {
        let mut config = Config::default();
        config.forecast.horizon_months = 6;
        let today = NaiveDate::from_ymd_opt(2025, 7, 13).unwrap();

        let prediction = config.prediction_config(today);
        assert_eq!(prediction.horizon, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        assert_eq!(prediction.birth_date, config.subject.birth_date);
    }
}
