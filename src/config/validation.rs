//! Configuration validation utilities and rules
//!
//! `Config::validate` rejects settings the monitor cannot run with. The
//! checks here run on top of it and only produce advisory warnings.

use crate::{
    models::Config,
    error::Result,
};
use colored::Colorize;
use std::net::IpAddr;

/// Well-known public resolvers; probing them is the default use case
const KNOWN_PUBLIC_RESOLVERS: &[&str] = &[
    "8.8.8.8",      // Google DNS
    "8.8.4.4",      // Google DNS
    "1.1.1.1",      // Cloudflare DNS
    "1.0.0.1",      // Cloudflare DNS
    "208.67.222.222", // OpenDNS
    "208.67.220.220", // OpenDNS
    "9.9.9.9",      // Quad9 DNS
    "149.112.112.112", // Quad9 DNS
    "2001:4860:4860::8888", // Google IPv6 DNS
    "2001:4860:4860::8844", // Google IPv6 DNS
    "2606:4700:4700::1111", // Cloudflare IPv6 DNS
    "2606:4700:4700::1001", // Cloudflare IPv6 DNS
];

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and collect warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_host(config.host.trim()));
        warnings.extend(Self::validate_timing(config));
        Ok(warnings)
    }

    /// Notes about the probe target
    fn validate_host(host: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        match host.parse::<IpAddr>() {
            Ok(ip) => {
                if Self::is_known_public_resolver(&ip) {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Info,
                        format!("Probing well-known public resolver: {}", ip)
                    ));
                }

                if ip.is_loopback() {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Warning,
                        format!("Host {} is a loopback address; latency will not reflect the network", ip)
                    ));
                } else if let IpAddr::V4(ipv4) = ip {
                    if ipv4.is_private() {
                        warnings.push(ValidationWarning::new(
                            ValidationLevel::Info,
                            format!("Host {} is in a private IP range", ip)
                        ));
                    }
                }
            }
            Err(_) => {
                if host.eq_ignore_ascii_case("localhost") {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Warning,
                        "Host localhost is a loopback address; latency will not reflect the network".to_string()
                    ));
                } else if !host.contains('.') {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Info,
                        format!("Host '{}' is not fully qualified and relies on the local search domain", host)
                    ));
                }
            }
        }

        warnings
    }

    /// Notes about interval, timeout and duration interplay
    fn validate_timing(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.timeout_seconds < 2 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Timeout of {}s may report slow replies as failures", config.timeout_seconds)
            ));
        }

        if config.timeout_seconds > config.interval_seconds {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Timeout ({}s) exceeds interval ({}s); a lost reply stretches that cycle to {}s",
                    config.timeout_seconds,
                    config.interval_seconds,
                    config.timeout_seconds + config.interval_seconds
                )
            ));
        }

        if let Some(duration) = config.duration_seconds {
            if duration < config.interval_seconds {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!(
                        "Duration ({}s) is shorter than the interval ({}s); only one probe will run",
                        duration, config.interval_seconds
                    )
                ));
            } else if duration / config.interval_seconds < 2 {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    "Run is too short for a standard deviation to be reported".to_string()
                ));
            }
        }

        warnings
    }

    fn is_known_public_resolver(ip: &IpAddr) -> bool {
        KNOWN_PUBLIC_RESOLVERS
            .iter()
            .filter_map(|known| known.parse::<IpAddr>().ok())
            .any(|known| known == *ip)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if !use_color {
            return format!("{} {}", tag, self.message);
        }
        let tag = match self.level {
            ValidationLevel::Info => tag.blue(),
            ValidationLevel::Warning => tag.yellow(),
            ValidationLevel::Error => tag.red(),
        };
        format!("{} {}", tag, self.message)
    }
}

/// Validate configuration and return advisory warnings
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
