//! Descriptive statistics over a monitoring run

use crate::models::RunLog;
use serde::Serialize;
use std::time::Duration;

/// Summary statistics over successful samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of successful samples
    pub count: usize,
    /// Lowest latency in milliseconds
    pub min_ms: f64,
    /// Highest latency in milliseconds
    pub max_ms: f64,
    /// Arithmetic mean latency in milliseconds
    pub mean_ms: f64,
    /// Unbiased sample standard deviation; undefined for fewer than two samples
    pub std_dev_ms: Option<f64>,
}

impl Statistics {
    /// Reduce a set of latencies, or `None` when there are none
    ///
    /// Values are sorted before summation so that the result does not
    /// depend on measurement order, not even in the last floating-point bit.
    pub fn from_latencies(latencies: &[f64]) -> Option<Self> {
        if latencies.is_empty() {
            return None;
        }

        let mut sorted = latencies.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let min_ms = sorted[0];
        let max_ms = sorted[count - 1];
        let mean_ms = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            min_ms,
            max_ms,
            mean_ms,
            std_dev_ms: sample_standard_deviation(&sorted, mean_ms),
        })
    }

    /// Reduce the latencies recorded in a run log
    pub fn from_run_log(log: &RunLog) -> Option<Self> {
        Self::from_latencies(&log.latencies())
    }

    /// Spread between the fastest and slowest sample
    pub fn range_ms(&self) -> f64 {
        self.max_ms - self.min_ms
    }
}

/// sqrt(Σ(xᵢ − mean)² / (N − 1)), defined for N ≥ 2
fn sample_standard_deviation(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let variance = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Why the monitor loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured duration was used up
    DurationElapsed,
    /// An external cancellation request (e.g. Ctrl-C) arrived
    Cancelled,
}

impl StopReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::DurationElapsed => "Monitoring duration reached.",
            Self::Cancelled => "Monitor stopped by user.",
        }
    }
}

/// Everything reported once a monitoring run ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Host that was probed
    pub host: String,
    pub stop_reason: StopReason,
    /// Probes started and completed
    pub attempts: u64,
    /// Probes that did not yield a latency
    pub failures: u64,
    /// Wall time from loop start to stop
    pub elapsed: Duration,
    /// `None` when no probe succeeded
    pub statistics: Option<Statistics>,
}

impl RunSummary {
    /// Reduce a finished run into its summary
    pub fn new(
        host: impl Into<String>,
        stop_reason: StopReason,
        attempts: u64,
        failures: u64,
        elapsed: Duration,
        log: &RunLog,
    ) -> Self {
        Self {
            host: host.into(),
            stop_reason,
            attempts,
            failures,
            elapsed,
            statistics: Statistics::from_run_log(log),
        }
    }

    /// Number of successful probes
    pub fn success_count(&self) -> usize {
        self.statistics.as_ref().map_or(0, |s| s.count)
    }

    /// Share of attempts that failed, in percent
    pub fn loss_percent(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.failures as f64 / self.attempts as f64 * 100.0
        }
    }
}
