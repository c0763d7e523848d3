//! Probe failure taxonomy
//!
//! Every way a single echo attempt can fail. The monitor loop treats all
//! kinds the same way (one failed observation), but each carries a cause
//! suitable for logging.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single latency probe
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// No reply arrived before the probe timeout
    #[error("probe to {host} timed out after {}s", .timeout.as_secs_f64())]
    Timeout { host: String, timeout: Duration },

    /// The echo utility reported the host as unreachable
    #[error("host {host} unreachable: {reason}")]
    Unreachable { host: String, reason: String },

    /// The host name could not be resolved
    #[error("could not resolve host {host}")]
    Resolution { host: String },

    /// The reply did not contain a recognizable latency value
    #[error("unparseable probe response: {0}")]
    Unparseable(String),

    /// The echo utility could not be started
    #[error("failed to run ping utility: {0}")]
    Spawn(String),

    /// The host identifier is not usable as a probe target
    #[error("invalid probe target: {0:?}")]
    InvalidHost(String),
}

impl ProbeError {
    /// Create a timeout error
    pub fn timeout<S: Into<String>>(host: S, timeout: Duration) -> Self {
        Self::Timeout { host: host.into(), timeout }
    }

    /// Create an unreachable-host error
    pub fn unreachable<H: Into<String>, R: Into<String>>(host: H, reason: R) -> Self {
        Self::Unreachable { host: host.into(), reason: reason.into() }
    }

    /// Create a name resolution error
    pub fn resolution<S: Into<String>>(host: S) -> Self {
        Self::Resolution { host: host.into() }
    }

    /// Create an unparseable response error
    pub fn unparseable<S: Into<String>>(detail: S) -> Self {
        Self::Unparseable(detail.into())
    }

    /// Stable short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Unreachable { .. } => "unreachable",
            Self::Resolution { .. } => "resolution",
            Self::Unparseable(_) => "unparseable",
            Self::Spawn(_) => "spawn",
            Self::InvalidHost(_) => "invalid_host",
        }
    }

    /// Whether the failure happened on the network rather than locally
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Unreachable { .. } | Self::Resolution { .. }
        )
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(error: std::io::Error) -> Self {
        Self::Spawn(error.to_string())
    }
}
