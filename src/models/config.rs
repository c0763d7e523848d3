//! Configuration data model and validation

use crate::error::{AppError, Result};
use crate::monitor::MonitorSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming the target host
pub const ENV_HOST: &str = "PING_HOST";
/// Environment variable for the probe interval in seconds
pub const ENV_INTERVAL: &str = "PING_INTERVAL";
/// Environment variable for the total run duration in seconds (0 = unbounded)
pub const ENV_DURATION: &str = "PING_DURATION";
/// Environment variable for the probe timeout in seconds
pub const ENV_TIMEOUT: &str = "PING_TIMEOUT";
/// Environment variable toggling colored output
pub const ENV_ENABLE_COLOR: &str = "ENABLE_COLOR";

/// Upper bound on the probe interval
pub const MAX_INTERVAL_SECONDS: u64 = 3600;
/// Upper bound on the probe timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 60;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Host to probe (hostname or IP address)
    #[serde(default = "default_host")]
    pub host: String,

    /// Seconds to sleep after each probe
    #[serde(default = "default_interval_secs")]
    pub interval_seconds: u64,

    /// Total run time budget in seconds; `None` runs until interrupted
    #[serde(default)]
    pub duration_seconds: Option<u64>,

    /// Per-probe timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            interval_seconds: default_interval_secs(),
            duration_seconds: None,
            timeout_seconds: default_timeout_secs(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the probe interval as Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Get the run duration as Duration, if bounded
    pub fn duration(&self) -> Option<Duration> {
        self.duration_seconds.map(Duration::from_secs)
    }

    /// Get the probe timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Build the settings consumed by the monitor loop
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            host: self.host.trim().to_string(),
            interval: self.interval(),
            duration: self.duration(),
            timeout: self.timeout(),
        }
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(AppError::config("Host cannot be empty"));
        }

        if host.starts_with('-') || host.chars().any(char::is_whitespace) {
            return Err(AppError::config(format!("Invalid host '{}'", self.host)));
        }

        if self.interval_seconds == 0 {
            return Err(AppError::config("Interval must be greater than 0"));
        }

        if self.interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(AppError::config(format!(
                "Interval cannot exceed {} seconds",
                MAX_INTERVAL_SECONDS
            )));
        }

        if self.duration_seconds == Some(0) {
            return Err(AppError::config("Duration must be greater than 0 when set"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                MAX_TIMEOUT_SECONDS
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge settings from an arbitrary key lookup
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            let host = host.trim();
            if !host.is_empty() {
                self.host = host.to_string();
            }
        }

        if let Some(interval) = lookup(ENV_INTERVAL) {
            self.interval_seconds = interval.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_INTERVAL, interval, e)))?;
        }

        if let Some(duration) = lookup(ENV_DURATION) {
            self.duration_seconds = parse_optional_seconds(&duration)
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_DURATION, duration, e)))?;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_TIMEOUT, timeout, e)))?;
        }

        if let Some(enable_color) = lookup(ENV_ENABLE_COLOR) {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_ENABLE_COLOR, enable_color, e)))?;
        }

        Ok(())
    }
}

/// Parse a seconds value where empty or `0` means "no limit"
pub fn parse_optional_seconds(value: &str) -> std::result::Result<Option<u64>, std::num::ParseIntError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let seconds: u64 = value.parse()?;
    Ok((seconds > 0).then_some(seconds))
}

// Default value functions for serde
fn default_host() -> String {
    crate::defaults::DEFAULT_HOST.to_string()
}

fn default_interval_secs() -> u64 {
    crate::defaults::DEFAULT_INTERVAL.as_secs()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
