//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::{
    parse_optional_seconds, ENV_DURATION, ENV_ENABLE_COLOR, ENV_HOST, ENV_INTERVAL, ENV_TIMEOUT,
    MAX_INTERVAL_SECONDS, MAX_TIMEOUT_SECONDS,
};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    ///
    /// Variables already present in the process environment win over the
    /// file, so the file only fills gaps.
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Ping Monitor Configuration
#
# Values here act as defaults and can be overridden by real environment
# variables or command-line arguments.

# Host to probe (hostname or IP address)
# PING_HOST=8.8.8.8

# Seconds to wait between probes (1-3600)
# PING_INTERVAL=5

# Total run time in seconds; 0 or empty runs until Ctrl-C
# PING_DURATION=0

# Seconds to wait for a single reply (1-60)
# PING_TIMEOUT=5

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Example: watch a gateway for ten minutes, probing every two seconds
# PING_HOST=192.168.1.1
# PING_INTERVAL=2
# PING_DURATION=600
"#.to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        let content = Self::create_example_env_content();
        std::fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            ENV_HOST => {
                let host = value.trim();
                if host.starts_with('-') || host.chars().any(char::is_whitespace) {
                    return Err(AppError::config(format!("Invalid {} value '{}'", ENV_HOST, value)));
                }
            }
            ENV_INTERVAL => {
                let interval: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_INTERVAL, value, e)))?;
                if interval == 0 || interval > MAX_INTERVAL_SECONDS {
                    return Err(AppError::config(format!(
                        "{} must be between 1 and {}, got: {}",
                        ENV_INTERVAL, MAX_INTERVAL_SECONDS, interval
                    )));
                }
            }
            ENV_DURATION => {
                parse_optional_seconds(value)
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_DURATION, value, e)))?;
            }
            ENV_TIMEOUT => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_TIMEOUT, value, e)))?;
                if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
                    return Err(AppError::config(format!(
                        "{} must be between 1 and {}, got: {}",
                        ENV_TIMEOUT, MAX_TIMEOUT_SECONDS, timeout
                    )));
                }
            }
            ENV_ENABLE_COLOR => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_ENABLE_COLOR, value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (ENV_HOST, "Host to probe (hostname or IP)", "8.8.8.8"),
            (ENV_INTERVAL, "Seconds between probes (1-3600)", "5"),
            (ENV_DURATION, "Total run time in seconds (0 = until Ctrl-C)", "300"),
            (ENV_TIMEOUT, "Per-probe timeout in seconds (1-60)", "5"),
            (ENV_ENABLE_COLOR, "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<16} {}\n", var, description));
            help.push_str(&format!("  {:<16} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate every supported variable currently set in the environment
    pub fn validate_current_env() -> Result<()> {
        Self::validate_lookup(|key| std::env::var(key).ok())
    }

    /// Validate supported variables as seen through an arbitrary lookup
    pub fn validate_lookup<F>(lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Some(value) = lookup(var_name) {
                Self::validate_env_var(var_name, &value)?;
            }
        }
        Ok(())
    }

    /// Check an env file and report lines that would be rejected
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = Self::validate_env_var(key.trim(), value.trim()) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}
