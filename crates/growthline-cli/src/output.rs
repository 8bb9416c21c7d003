//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use growthline_domain::{
    CurrentStats, Metric, PointKind, PredictionRecord, SafetyThreshold, SeriesPair, TimelinePoint,
};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether output is meant for people rather than scripts.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Format forecast records.
    pub fn format_predictions(
        &self,
        records: &[PredictionRecord],
        threshold: &SafetyThreshold,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_predictions_table(records, threshold)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| format!("{}\t{:.2}\t{:.1}", r.date, r.predicted_weight, r.predicted_height))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_predictions_table(&self, records: &[PredictionRecord], threshold: &SafetyThreshold) -> String {
        if records.is_empty() {
            return self.colorize("No forecast within the horizon.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Date", "Weeks", "Months", "Weight", "Wt %ile", "WHO 50th", "Height", "Ht %ile", "WHO 50th", "Limit",
        ]);

        for r in records {
            builder.push_record([
                r.date.to_string(),
                r.age_weeks.to_string(),
                r.age_months.to_string(),
                format!("{:.2} kg", r.predicted_weight),
                r.weight_percentile.to_string(),
                format!("{:.2}", r.who50th_weight),
                format!("{:.1} cm", r.predicted_height),
                r.height_percentile.to_string(),
                format!("{:.1}", r.who50th_height),
                if r.crosses(threshold) { "⚠".to_string() } else { String::new() },
            ]);
        }

        styled(builder.build())
    }

    /// Summarize when the car-seat limit is reached.
    pub fn crossing_summary(
        &self,
        crossing: Option<&PredictionRecord>,
        threshold: &SafetyThreshold,
    ) -> String {
        match crossing {
            Some(r) => self.warning(&format!(
                "Car seat limit ({} kg / {} cm) reached around {} at {} weeks: {:.2} kg, {:.1} cm",
                threshold.weight_limit,
                threshold.height_limit,
                r.date,
                r.age_weeks,
                r.predicted_weight,
                r.predicted_height
            )),
            None => self.success(&format!(
                "Car seat limit ({} kg / {} cm) not reached within the forecast",
                threshold.weight_limit, threshold.height_limit
            )),
        }
    }

    /// Format current stats.
    pub fn format_stats(&self, stats: &CurrentStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(format!(
                "{}\t{}\t{}",
                stats.age.weeks, stats.weight_percentile, stats.height_percentile
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["", "Value", "Measured", "Percentile"]);
                builder.push_record([
                    "Age".to_string(),
                    format!("{} weeks ({} months)", stats.age.weeks, stats.age.months),
                    format!("{} days", stats.age.days),
                    String::new(),
                ]);
                builder.push_record([
                    "Weight".to_string(),
                    format!("{} kg", stats.last_weight.value),
                    stats.last_weight.date.to_string(),
                    stats.weight_percentile.to_string(),
                ]);
                builder.push_record([
                    "Height".to_string(),
                    format!("{} cm", stats.last_height.value),
                    stats.last_height.date.to_string(),
                    stats.height_percentile.to_string(),
                ]);
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format recorded measurements, optionally for one metric only.
    pub fn format_series(&self, series: &SeriesPair, only: Option<Metric>) -> Result<String> {
        let metrics: Vec<Metric> = match only {
            Some(metric) => vec![metric],
            None => vec![Metric::Weight, Metric::Height],
        };

        match self.format {
            OutputFormat::Json => match only {
                Some(metric) => Ok(serde_json::to_string_pretty(series.series(metric))?),
                None => Ok(serde_json::to_string_pretty(series)?),
            },
            OutputFormat::Quiet => Ok(metrics
                .iter()
                .flat_map(|metric| {
                    series
                        .series(*metric)
                        .iter()
                        .enumerate()
                        .map(move |(i, m)| format!("{}\t{}\t{}\t{}", metric, i, m.date, m.value))
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "#", "Date", "Value"]);
                let mut rows = 0;

                for metric in &metrics {
                    for (i, m) in series.series(*metric).iter().enumerate() {
                        builder.push_record([
                            metric.to_string(),
                            i.to_string(),
                            m.date.to_string(),
                            format!("{} {}", m.value, metric.unit()),
                        ]);
                        rows += 1;
                    }
                }

                if rows == 0 {
                    return Ok(self.colorize("No measurements recorded.", "yellow"));
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format merged chart points.
    pub fn format_timeline(&self, points: &[TimelinePoint]) -> Result<String> {
        let value = |v: Option<f64>, precision: usize| {
            v.map(|v| format!("{:.*}", precision, v)).unwrap_or_default()
        };

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(points)?),
            OutputFormat::Quiet => Ok(points
                .iter()
                .map(|p| format!("{}\t{}\t{}", p.date, value(p.weight, 2), value(p.height, 1)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if points.is_empty() {
                    return Ok(self.colorize("Nothing to chart.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Date", "Weeks", "Weight (kg)", "Height (cm)", "Type"]);
                for p in points {
                    let kind = match p.kind {
                        PointKind::Actual => "actual",
                        PointKind::Predicted => "predicted",
                    };
                    builder.push_record([
                        p.date.to_string(),
                        p.age_weeks.to_string(),
                        value(p.weight, 2),
                        value(p.height, 1),
                        kind.to_string(),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use growthline_domain::{current_stats, first_crossing, predict, timeline, PredictionConfig};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<PredictionRecord> {
        let config = PredictionConfig::new(date(2025, 5, 7), date(2025, 7, 13))
            .with_horizon(date(2025, 7, 27));
        predict(&SeriesPair::default(), &config).unwrap()
    }

    #[test]
    fn test_predictions_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_predictions(&sample_records(), &SafetyThreshold::default())
            .unwrap();
        assert!(output.contains("WHO 50th"));
        assert!(output.contains("2025-07-13"));
        assert!(output.contains("5.67 kg"));
    }

    #[test]
    fn test_predictions_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_predictions(&sample_records(), &SafetyThreshold::default())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(3));
        assert_eq!(parsed[0]["date"], "2025-07-13");
        assert_eq!(parsed[0]["age_weeks"], 9);
    }

    #[test]
    fn test_predictions_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_predictions(&sample_records(), &SafetyThreshold::default())
            .unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.starts_with("2025-07-13\t5.67\t"));
    }

    #[test]
    fn test_empty_predictions() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_predictions(&[], &SafetyThreshold::default())
            .unwrap();
        assert!(output.contains("No forecast"));
    }

    #[test]
    fn test_crossing_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let records = sample_records();

        // 5.44 kg anchor reaches 5.8 kg on the second weekly step
        let low = SafetyThreshold {
            weight_limit: 5.8,
            height_limit: 100.0,
        };
        let crossing = first_crossing(&records, &low);
        assert_eq!(crossing.map(|r| r.date), Some(date(2025, 7, 20)));

        let reached = formatter.crossing_summary(crossing, &low);
        assert!(reached.starts_with("⚠ Car seat limit (5.8 kg / 100 cm) reached"));
        assert!(reached.contains("2025-07-20"));

        let default = SafetyThreshold::default();
        let not_reached = formatter.crossing_summary(first_crossing(&records, &default), &default);
        assert!(not_reached.contains("not reached"));
    }

    #[test]
    fn test_stats_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stats = current_stats(&SeriesPair::default(), date(2025, 5, 7), date(2025, 7, 13)).unwrap();
        let output = formatter.format_stats(&stats).unwrap();
        assert!(output.contains("Percentile"));
        assert!(output.contains("5.44 kg"));
    }

    #[test]
    fn test_series_table_and_filter() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let pair = SeriesPair::default();

        let all = formatter.format_series(&pair, None).unwrap();
        assert!(all.contains("weight"));
        assert!(all.contains("height"));

        let heights = formatter.format_series(&pair, Some(Metric::Height)).unwrap();
        assert!(!heights.contains("weight"));
        assert!(heights.contains("61 cm"));
    }

    #[test]
    fn test_empty_series() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_series(&SeriesPair::empty(), None).unwrap();
        assert!(output.contains("No measurements"));
    }

    #[test]
    fn test_series_quiet_lists_indices() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_series(&SeriesPair::default(), Some(Metric::Height))
            .unwrap();
        assert_eq!(output.lines().next(), Some("height\t0\t2025-05-07\t54"));
    }

    #[test]
    fn test_timeline_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let pair = SeriesPair::default();
        let points = timeline(&pair, &sample_records(), date(2025, 5, 7), 52);
        let output = formatter.format_timeline(&points).unwrap();
        assert!(output.contains("actual"));
        assert!(output.contains("predicted"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
