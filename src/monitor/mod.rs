//! Monitoring loop
//!
//! Drives a [`LatencyProbe`] at a fixed interval, records successful
//! samples, streams one status line per attempt, and reduces the run log to
//! a [`RunSummary`] when the duration is used up or cancellation arrives.
//!
//! The loop is cooperative: it awaits either the probe or the inter-probe
//! sleep, and both are raced against the cancellation token. A cancelled
//! probe is dropped without recording anything.

use crate::error::ProbeError;
use crate::logging::ProbeLogger;
use crate::models::{RunLog, Sample, StatusLine};
use crate::output::StatusReporter;
use crate::probe::LatencyProbe;
use crate::stats::{RunSummary, StopReason};
use chrono::Local;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

/// Inputs for one monitoring run
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    /// Host to probe
    pub host: String,
    /// Sleep between the end of one probe and the start of the next
    pub interval: Duration,
    /// Total time budget; `None` runs until cancelled
    pub duration: Option<Duration>,
    /// Per-probe timeout
    pub timeout: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            host: crate::defaults::DEFAULT_HOST.to_string(),
            interval: crate::defaults::DEFAULT_INTERVAL,
            duration: None,
            timeout: crate::defaults::DEFAULT_TIMEOUT,
        }
    }
}

impl MonitorSettings {
    pub fn new<S: Into<String>>(host: S) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Periodic latency monitor for a single host
pub struct Monitor<P> {
    settings: MonitorSettings,
    probe: P,
    logger: ProbeLogger,
}

impl<P: LatencyProbe> Monitor<P> {
    /// Create a monitor that logs nothing beyond its reporter output
    pub fn new(settings: MonitorSettings, probe: P) -> Self {
        Self::with_logger(settings, probe, ProbeLogger::silent())
    }

    pub fn with_logger(settings: MonitorSettings, probe: P, logger: ProbeLogger) -> Self {
        Self { settings, probe, logger }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Run until the duration elapses or `cancel` fires, then summarize
    pub async fn run(&self, reporter: &mut dyn StatusReporter, cancel: &CancellationToken) -> RunSummary {
        self.run_with_log(reporter, cancel).await.0
    }

    /// Like [`Monitor::run`], also handing back the collected run log
    pub async fn run_with_log(
        &self,
        reporter: &mut dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> (RunSummary, RunLog) {
        let settings = &self.settings;
        let started = Instant::now();
        let mut log = RunLog::new();
        let mut attempts: u64 = 0;
        let mut failures: u64 = 0;

        reporter.started(settings);
        self.logger
            .log_run_started(
                &settings.host,
                settings.interval.as_secs_f64(),
                settings.duration.map(|d| d.as_secs_f64()),
            )
            .await;

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if let Some(limit) = settings.duration {
                if started.elapsed() >= limit {
                    break StopReason::DurationElapsed;
                }
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => break StopReason::Cancelled,
                result = self.probe.probe(&settings.host, settings.timeout) => result,
            };

            attempts += 1;
            let timestamp = Local::now();
            let sample = result.and_then(|latency_ms| {
                Sample::new(latency_ms, timestamp)
                    .ok_or_else(|| ProbeError::unparseable(format!("invalid latency value {}", latency_ms)))
            });

            match sample {
                Ok(sample) => {
                    let latency_ms = sample.latency_ms();
                    log.append(sample);
                    reporter.status(&StatusLine::success(attempts, timestamp, latency_ms));
                    self.logger.log_probe_success(&settings.host, attempts, latency_ms).await;
                }
                Err(error) => {
                    failures += 1;
                    reporter.status(&StatusLine::failure(attempts, timestamp, &error));
                    self.logger.log_probe_failure(&settings.host, attempts, &error).await;
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break StopReason::Cancelled,
                _ = sleep(settings.interval) => {}
            }
        };

        let summary = RunSummary::new(
            settings.host.clone(),
            stop_reason,
            attempts,
            failures,
            started.elapsed(),
            &log,
        );

        reporter.finished(&summary);
        self.logger.log_run_finished(&summary).await;

        (summary, log)
    }
}
