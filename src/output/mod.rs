//! Output formatting and display system
//!
//! The monitor loop writes through a [`StatusReporter`]; the console
//! implementation renders with an [`OutputFormatter`], colored or plain.

mod colored;
mod formatter;

pub use self::colored::{ColoredFormatter, LatencyLevel};
pub use formatter::{format_seconds, FormattingOptions, OutputFormatter, PlainFormatter, TIMESTAMP_FORMAT};

use crate::{
    models::StatusLine,
    monitor::MonitorSettings,
    stats::RunSummary,
};
use std::io::{self, Write};

/// Line-oriented sink for monitor progress
///
/// Reporting never influences control flow, so implementations swallow
/// their own I/O errors.
pub trait StatusReporter: Send {
    /// Called once before the first probe
    fn started(&mut self, _settings: &MonitorSettings) {}

    /// Called once per probe attempt
    fn status(&mut self, line: &StatusLine);

    /// Called once after the loop stops
    fn finished(&mut self, summary: &RunSummary);
}

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            ..FormattingOptions::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false, false)
    }
}

/// Reporter that writes formatted lines to a writer (stdout by default)
pub struct ConsoleReporter<W: Write + Send = io::Stdout> {
    formatter: Box<dyn OutputFormatter>,
    writer: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to standard output
    pub fn stdout(formatter: Box<dyn OutputFormatter>) -> Self {
        Self::new(formatter, io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, writer: W) -> Self {
        Self { formatter, writer }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, rendered: crate::error::Result<String>) {
        let text = match rendered {
            Ok(text) => text,
            Err(e) => format!("<output error: {}>", e),
        };
        let _ = writeln!(self.writer, "{}", text);
        let _ = self.writer.flush();
    }
}

impl<W: Write + Send> StatusReporter for ConsoleReporter<W> {
    fn started(&mut self, settings: &MonitorSettings) {
        let rendered = self.formatter.format_banner(settings);
        self.emit(rendered);
    }

    fn status(&mut self, line: &StatusLine) {
        let rendered = self.formatter.format_status(line);
        self.emit(rendered);
    }

    fn finished(&mut self, summary: &RunSummary) {
        let rendered = self.formatter.format_summary(summary);
        self.emit(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::models::RunLog;
    use crate::stats::StopReason;
    use chrono::Local;
    use std::time::Duration;

    #[test]
    fn test_console_reporter_writes_one_line_per_status() {
        let mut reporter = ConsoleReporter::new(OutputFormatterFactory::create_plain_formatter(), Vec::new());

        reporter.started(&MonitorSettings::default());
        reporter.status(&StatusLine::success(1, Local::now(), 9.5));
        reporter.status(&StatusLine::failure(2, Local::now(), &ProbeError::resolution("x")));
        reporter.finished(&RunSummary::new(
            "8.8.8.8",
            StopReason::Cancelled,
            2,
            2,
            Duration::from_secs(3),
            &RunLog::new(),
        ));

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Starting ping monitor for 8.8.8.8..."));
        assert_eq!(text.matches("✓ OK").count(), 1);
        assert_eq!(text.matches("✗ FAILED").count(), 1);
        assert!(text.contains("Ping: 9.50ms"));
        assert!(text.trim_end().ends_with("No successful pings recorded. (2 attempts failed)"));
    }

    #[test]
    fn test_factory_selects_formatter() {
        let plain = OutputFormatterFactory::create_formatter(false, false);
        let line = plain.format_status(&StatusLine::success(1, Local::now(), 1.0)).unwrap();
        assert!(line.contains("✓ OK"));

        let colored = OutputFormatterFactory::create_formatter(true, true);
        let line = colored.format_status(&StatusLine::success(1, Local::now(), 1.0)).unwrap();
        assert!(line.contains("1.00ms"));
    }
}
