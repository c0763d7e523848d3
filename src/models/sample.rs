//! Samples, the run log, and per-attempt status records

use crate::error::ProbeError;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One successful latency measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Round-trip latency in milliseconds
    latency_ms: f64,
    /// Wall-clock instant of the measurement
    timestamp: DateTime<Local>,
}

impl Sample {
    /// Create a sample; negative or non-finite latencies are rejected
    pub fn new(latency_ms: f64, timestamp: DateTime<Local>) -> Option<Self> {
        (latency_ms.is_finite() && latency_ms >= 0.0).then_some(Self { latency_ms, timestamp })
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Append-only, measurement-ordered collection of samples
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunLog {
    samples: Vec<Sample>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample at the end of the log
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Latencies in measurement order
    pub fn latencies(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::latency_ms).collect()
    }
}

/// Result of one probe attempt as seen by the output stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The probe returned a latency
    Success { latency_ms: f64 },
    /// The probe failed; only the cause is kept
    Failure { kind: String, cause: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency_ms } => Some(*latency_ms),
            Self::Failure { .. } => None,
        }
    }
}

impl From<&ProbeError> for ProbeOutcome {
    fn from(error: &ProbeError) -> Self {
        Self::Failure {
            kind: error.kind().to_string(),
            cause: error.to_string(),
        }
    }
}

/// One line of live status output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLine {
    /// 1-based attempt number
    pub sequence: u64,
    /// When the probe finished
    pub timestamp: DateTime<Local>,
    pub outcome: ProbeOutcome,
}

impl StatusLine {
    pub fn success(sequence: u64, timestamp: DateTime<Local>, latency_ms: f64) -> Self {
        Self {
            sequence,
            timestamp,
            outcome: ProbeOutcome::Success { latency_ms },
        }
    }

    pub fn failure(sequence: u64, timestamp: DateTime<Local>, error: &ProbeError) -> Self {
        Self {
            sequence,
            timestamp,
            outcome: ProbeOutcome::from(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}
