//! Main application orchestration and execution

use crate::{
    config::{display_config_summary, validate_config, ValidationLevel},
    error::Result,
    logging::LoggerFactory,
    models::Config,
    monitor::Monitor,
    output::{ConsoleReporter, OutputFormatterFactory, StatusReporter},
    probe::{LatencyProbe, SystemPing},
    stats::RunSummary,
};
use tokio_util::sync::CancellationToken;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
}

impl App {
    /// Create a new application instance from a loaded configuration
    pub fn new(config: Config) -> Self {
        let loggers = LoggerFactory::new(config.clone());
        Self { config, loggers }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session ID stamped on every log entry of this run
    pub fn session_id(&self) -> &str {
        self.loggers.session_id()
    }

    /// Probe the configured host with the system `ping`, printing to stdout
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunSummary> {
        let formatter = OutputFormatterFactory::create_formatter(self.config.enable_color, self.config.verbose);
        let mut reporter = ConsoleReporter::stdout(formatter);
        self.run_with(SystemPing::new(), &mut reporter, cancel).await
    }

    /// Run with an explicit probe and reporter
    pub async fn run_with<P: LatencyProbe>(
        &self,
        probe: P,
        reporter: &mut dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> Result<RunSummary> {
        let warnings = validate_config(&self.config)?;

        if self.config.debug {
            eprintln!("{} v{} (session {})", crate::PKG_NAME, crate::VERSION, self.session_id());
            eprintln!("Configuration Summary:");
            eprintln!("{}", display_config_summary(&self.config));
        }

        for warning in &warnings {
            if warning.level != ValidationLevel::Info || self.config.verbose || self.config.debug {
                eprintln!("{}", warning.format(self.config.enable_color));
            }
        }

        let logger = self.loggers.create_probe_logger().await;
        let monitor = Monitor::with_logger(self.config.monitor_settings(), probe, logger);

        Ok(monitor.run(reporter, cancel).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::stats::StopReason;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedProbe(f64);

    #[async_trait]
    impl LatencyProbe for FixedProbe {
        async fn probe(&self, _host: &str, _timeout: Duration) -> std::result::Result<f64, ProbeError> {
            Ok(self.0)
        }
    }

    fn quiet_config() -> Config {
        Config {
            host: "192.0.2.1".to_string(),
            interval_seconds: 1,
            duration_seconds: Some(3),
            timeout_seconds: 2,
            enable_color: false,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_reports_every_probe() {
        let app = App::new(quiet_config());
        let mut reporter = ConsoleReporter::new(OutputFormatterFactory::create_plain_formatter(), Vec::new());

        let summary = app
            .run_with(FixedProbe(20.0), &mut reporter, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.stop_reason, StopReason::DurationElapsed);
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.statistics.as_ref().unwrap().mean_ms, 20.0);

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Starting ping monitor for 192.0.2.1..."));
        assert_eq!(text.matches("✓ OK").count(), 3);
        assert!(text.contains("Monitoring duration reached."));
    }

    #[tokio::test]
    async fn test_run_with_rejects_invalid_config() {
        let app = App::new(Config {
            interval_seconds: 0,
            ..quiet_config()
        });
        let mut reporter = ConsoleReporter::new(OutputFormatterFactory::create_plain_formatter(), Vec::new());

        let result = app.run_with(FixedProbe(1.0), &mut reporter, &CancellationToken::new()).await;
        assert!(result.is_err());
        assert!(reporter.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let app = App::new(quiet_config());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut reporter = ConsoleReporter::new(OutputFormatterFactory::create_plain_formatter(), Vec::new());

        let summary = app.run_with(FixedProbe(1.0), &mut reporter, &cancel).await.unwrap();
        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.attempts, 0);
        assert!(summary.statistics.is_none());
    }
}
