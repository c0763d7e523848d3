//! Command-line interface module

use crate::models::config::{MAX_INTERVAL_SECONDS, MAX_TIMEOUT_SECONDS};
use clap::Parser;

/// Ping Monitor - watch the round-trip latency of one host over time
#[derive(Parser, Debug, Clone)]
#[command(name = "pingmon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host to probe (hostname or IP address) [default: 8.8.8.8]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Seconds to wait between probes [default: 5]
    #[arg(short, long, value_parser = parse_interval)]
    pub interval: Option<u64>,

    /// Total run time in seconds; 0 runs until Ctrl-C [default: until Ctrl-C]
    #[arg(short, long, value_parser = parse_seconds)]
    pub duration: Option<u64>,

    /// Seconds to wait for a single reply [default: 5]
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Describe the supported environment variables and exit
    #[arg(long)]
    pub env_help: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(ref host) = self.host {
            let host = host.trim();
            if host.is_empty() {
                return Err("--host cannot be empty".to_string());
            }
            if host.starts_with('-') || host.chars().any(char::is_whitespace) {
                return Err(format!("Invalid host '{}'", host));
            }
        }

        Ok(())
    }

    /// Resolve the color preference, falling back to `configured` and
    /// terminal detection when no flag was given
    pub fn use_colors(&self, configured: bool) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            configured && supports_color()
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let or_default = |value: Option<u64>| {
            value.map(|v| format!("{}s", v)).unwrap_or_else(|| "default".to_string())
        };

        let mut summary = String::new();
        summary.push_str("Command-line Overrides:\n");
        summary.push_str(&format!("  Host: {}\n", self.host.as_deref().unwrap_or("default")));
        summary.push_str(&format!("  Interval: {}\n", or_default(self.interval)));
        summary.push_str(&format!("  Duration: {}\n", or_default(self.duration)));
        summary.push_str(&format!("  Timeout: {}\n", or_default(self.timeout)));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));
        summary
    }
}

/// Parse a whole number of seconds
fn parse_seconds(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid number of seconds: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid number of seconds: {}", s))
}

fn parse_bounded_seconds(s: &str, what: &str, max: u64) -> Result<u64, String> {
    parse_seconds(s).and_then(|secs| {
        if secs == 0 {
            Err(format!("{} must be greater than 0", what))
        } else if secs > max {
            Err(format!("{} cannot exceed {} seconds", what, max))
        } else {
            Ok(secs)
        }
    })
}

fn parse_interval(s: &str) -> Result<u64, String> {
    parse_bounded_seconds(s, "Interval", MAX_INTERVAL_SECONDS)
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    parse_bounded_seconds(s, "Timeout", MAX_TIMEOUT_SECONDS)
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // On Windows, check for ANSICON or ConEmu
    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
