//! Colored formatter implementation with terminal color support
//!
//! Wraps the plain layout and colors markers and latencies by how fast the
//! reply was.

use crate::{
    error::Result,
    models::{ProbeOutcome, StatusLine},
    monitor::MonitorSettings,
    stats::RunSummary,
};
use super::formatter::{FormattingOptions, OutputFormatter, PlainFormatter, TIMESTAMP_FORMAT};
use colored::*;

/// Latency classification for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl LatencyLevel {
    /// Determine level from a round-trip time in milliseconds
    pub fn from_latency(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Excellent
        } else if latency_ms < 100.0 {
            Self::Good
        } else if latency_ms < 300.0 {
            Self::Fair
        } else if latency_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }

    /// Get descriptive text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

/// Colored output formatter
pub struct ColoredFormatter {
    plain: PlainFormatter,
}

impl ColoredFormatter {
    /// Create a new colored formatter
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain: PlainFormatter::new(options),
        }
    }

    fn latency(&self, latency_ms: f64) -> ColoredString {
        format!("{:.2}ms", latency_ms).color(LatencyLevel::from_latency(latency_ms).color())
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, settings: &MonitorSettings) -> Result<String> {
        let banner = self.plain.format_banner(settings)?;
        Ok(banner.replacen(&settings.host, &settings.host.bold().to_string(), 1))
    }

    fn format_status(&self, line: &StatusLine) -> Result<String> {
        let timestamp = line.timestamp.format(TIMESTAMP_FORMAT).to_string().dimmed();
        let formatted = match &line.outcome {
            ProbeOutcome::Success { latency_ms } => {
                format!("{} | {} | Ping: {}", timestamp, "✓ OK".green().bold(), self.latency(*latency_ms))
            }
            ProbeOutcome::Failure { cause, .. } => {
                let mut text = format!("{} | {} | {}", timestamp, "✗ FAILED".red().bold(), "Connection lost!".red());
                if self.plain.options().verbose_mode {
                    text.push_str(&format!(" ({})", cause.yellow()));
                }
                text
            }
        };
        Ok(formatted)
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut text = self.plain.format_summary(summary)?;
        if let Some(stats) = &summary.statistics {
            text = text.replacen("Ping Statistics:", &"Ping Statistics:".bold().to_string(), 1);
            let avg = format!("Avg ping: {:.2}ms", stats.mean_ms);
            let colored_avg = format!("Avg ping: {}", self.latency(stats.mean_ms));
            text = text.replacen(&avg, &colored_avg, 1);
        } else {
            let none = "No successful pings recorded.";
            text = text.replacen(none, &none.red().to_string(), 1);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunLog, Sample};
    use crate::stats::StopReason;
    use chrono::Local;
    use std::time::Duration;

    fn options() -> FormattingOptions {
        FormattingOptions {
            enable_color: true,
            verbose_mode: false,
            separator_width: 20,
        }
    }

    #[test]
    fn test_latency_levels() {
        assert_eq!(LatencyLevel::from_latency(12.0), LatencyLevel::Excellent);
        assert_eq!(LatencyLevel::from_latency(50.0), LatencyLevel::Good);
        assert_eq!(LatencyLevel::from_latency(150.0), LatencyLevel::Fair);
        assert_eq!(LatencyLevel::from_latency(500.0), LatencyLevel::Poor);
        assert_eq!(LatencyLevel::from_latency(1500.0), LatencyLevel::VeryPoor);
        assert_eq!(LatencyLevel::VeryPoor.description(), "Very Poor");
        assert_eq!(LatencyLevel::Excellent.color(), Color::Green);
    }

    #[test]
    fn test_colored_status_keeps_fields() {
        let formatter = ColoredFormatter::new(options());
        let line = formatter.format_status(&StatusLine::success(1, Local::now(), 12.5)).unwrap();
        assert!(line.contains("OK"));
        assert!(line.contains("12.50ms"));
    }

    #[test]
    fn test_colored_summary_keeps_fields() {
        let mut log = RunLog::new();
        log.append(Sample::new(8.0, Local::now()).unwrap());
        log.append(Sample::new(12.0, Local::now()).unwrap());
        let summary = RunSummary::new("h", StopReason::DurationElapsed, 2, 0, Duration::from_secs(4), &log);

        let text = ColoredFormatter::new(options()).format_summary(&summary).unwrap();
        assert!(text.contains("Ping Statistics:"));
        assert!(text.contains("10.00ms"));
        assert!(text.contains("Monitoring duration reached."));
    }
}
