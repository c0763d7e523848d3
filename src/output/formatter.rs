//! Core formatting trait and the plain text implementation

use crate::{
    error::{AppError, Result},
    models::{ProbeOutcome, StatusLine},
    monitor::MonitorSettings,
    stats::RunSummary,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Timestamp layout used on every status line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Main trait for output formatting
pub trait OutputFormatter: Send {
    /// Format the banner printed before the first probe
    fn format_banner(&self, settings: &MonitorSettings) -> Result<String>;

    /// Format one status line for a probe attempt
    fn format_status(&self, line: &StatusLine) -> Result<String>;

    /// Format the closing summary block
    fn format_summary(&self, summary: &RunSummary) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Include failure causes and run totals
    pub verbose_mode: bool,
    /// Width of the separator rule
    pub separator_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            separator_width: 60,
        }
    }
}

/// Render a duration as whole or fractional seconds
pub fn format_seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Horizontal rule between sections
    pub fn separator(&self) -> String {
        "-".repeat(self.options.separator_width)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, settings: &MonitorSettings) -> Result<String> {
        let mut output = String::new();
        let duration = settings
            .duration
            .map(format_seconds)
            .unwrap_or_else(|| "Infinite".to_string());

        writeln!(output, "Starting ping monitor for {}...", settings.host)
            .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;
        write!(
            output,
            "Interval: {} | Duration: {} | Timeout: {}\n{}",
            format_seconds(settings.interval),
            duration,
            format_seconds(settings.timeout),
            self.separator()
        )
        .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;

        Ok(output)
    }

    fn format_status(&self, line: &StatusLine) -> Result<String> {
        let timestamp = line.timestamp.format(TIMESTAMP_FORMAT);
        let formatted = match &line.outcome {
            ProbeOutcome::Success { latency_ms } => {
                format!("{} | ✓ OK | Ping: {:.2}ms", timestamp, latency_ms)
            }
            ProbeOutcome::Failure { cause, .. } => {
                if self.options.verbose_mode {
                    format!("{} | ✗ FAILED | Connection lost! ({})", timestamp, cause)
                } else {
                    format!("{} | ✗ FAILED | Connection lost!", timestamp)
                }
            }
        };
        Ok(formatted)
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();
        let err = |e: std::fmt::Error| AppError::io(format!("Failed to format summary: {}", e));

        writeln!(output, "{}", self.separator()).map_err(err)?;
        writeln!(output, "{}", summary.stop_reason.description()).map_err(err)?;
        writeln!(output).map_err(err)?;

        match &summary.statistics {
            Some(stats) => {
                writeln!(output, "Ping Statistics:").map_err(err)?;
                writeln!(output, "  Packets sent: {}", summary.attempts).map_err(err)?;
                writeln!(output, "  Packets received: {}", stats.count).map_err(err)?;
                writeln!(output, "  Packet loss: {:.1}%", summary.loss_percent()).map_err(err)?;
                writeln!(output, "  Min ping: {:.2}ms", stats.min_ms).map_err(err)?;
                writeln!(output, "  Max ping: {:.2}ms", stats.max_ms).map_err(err)?;
                write!(output, "  Avg ping: {:.2}ms", stats.mean_ms).map_err(err)?;
                if let Some(std_dev) = stats.std_dev_ms {
                    write!(output, "\n  Std Dev: {:.2}ms", std_dev).map_err(err)?;
                }
            }
            None => {
                write!(output, "No successful pings recorded.").map_err(err)?;
                if summary.attempts > 0 {
                    write!(output, " ({} attempts failed)", summary.failures).map_err(err)?;
                }
            }
        }

        if self.options.verbose_mode {
            write!(output, "\n  Elapsed: {:.1}s", summary.elapsed.as_secs_f64()).map_err(err)?;
        }

        Ok(output)
    }
}
