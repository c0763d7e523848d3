//! Ping Monitor
//!
//! Periodically probes a single host with the system `ping` utility, prints
//! one status line per attempt and, when the run ends, a summary of the
//! successful round-trip times.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod output;
pub mod probe;
pub mod stats;

// Re-export commonly used types
pub use app::App;
pub use error::{AppError, ProbeError, Result};
pub use models::{Config, RunLog, Sample, StatusLine};
pub use monitor::{Monitor, MonitorSettings};
pub use output::{ColoredFormatter, ConsoleReporter, OutputFormatter, OutputFormatterFactory, PlainFormatter, StatusReporter};
pub use probe::{LatencyProbe, SystemPing};
pub use stats::{RunSummary, Statistics, StopReason};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_HOST: &str = "8.8.8.8";
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
