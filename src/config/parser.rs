//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        EnvManager::load_env_file(self.cli.debug)?;
        self.parse_with_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary environment lookup
    ///
    /// No `.env` file is read here; [`ConfigParser::parse`] loads it into
    /// the process environment first.
    pub fn parse_with_lookup<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        EnvManager::validate_lookup(&lookup)?;
        config.merge_from_lookup(&lookup)?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref host) = self.cli.host {
            config.host = host.trim().to_string();
        }

        if let Some(interval) = self.cli.interval {
            config.interval_seconds = interval;
        }

        // 0 on the command line clears any duration set in the environment
        if let Some(duration) = self.cli.duration {
            config.duration_seconds = (duration > 0).then_some(duration);
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        config.enable_color = self.cli.use_colors(config.enable_color);

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!("{}", self.cli.get_config_summary());
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Host: {}", config.host));
    summary.push(format!("Interval: {}s", config.interval_seconds));
    summary.push(match config.duration_seconds {
        Some(duration) => format!("Duration: {}s", duration),
        None => "Duration: until interrupted".to_string(),
    });
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn parse(args: &[&str], env: &HashMap<String, String>) -> Result<Config> {
        let mut argv = vec!["pingmon"];
        argv.extend_from_slice(args);
        ConfigParser::new(Cli::parse_from(argv)).parse_with_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_config_parser_defaults() {
        let config = parse(&["--color"], &HashMap::new()).unwrap();

        assert_eq!(config.host, crate::defaults::DEFAULT_HOST);
        assert_eq!(config.interval_seconds, crate::defaults::DEFAULT_INTERVAL.as_secs());
        assert_eq!(config.timeout_seconds, crate::defaults::DEFAULT_TIMEOUT.as_secs());
        assert_eq!(config.duration_seconds, None);
        assert!(config.enable_color);
        assert!(!config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_env_values_applied() {
        let env = env_of(&[
            ("PING_HOST", "example.com"),
            ("PING_INTERVAL", "2"),
            ("PING_DURATION", "30"),
            ("PING_TIMEOUT", "3"),
            ("ENABLE_COLOR", "false"),
        ]);
        let config = parse(&[], &env).unwrap();

        assert_eq!(config.host, "example.com");
        assert_eq!(config.interval_seconds, 2);
        assert_eq!(config.duration_seconds, Some(30));
        assert_eq!(config.timeout_seconds, 3);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let env = env_of(&[("PING_INTERVAL", "8"), ("PING_DURATION", "120")]);
        let config = parse(&["--interval", "12", "--duration", "0", "--no-color", "--verbose"], &env).unwrap();

        assert_eq!(config.interval_seconds, 12);
        assert_eq!(config.duration_seconds, None);
        assert!(!config.enable_color);
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_env_rejected() {
        let env = env_of(&[("PING_TIMEOUT", "600")]);
        assert!(parse(&[], &env).is_err());

        let env = env_of(&[("PING_INTERVAL", "soon")]);
        assert!(parse(&[], &env).is_err());
    }

    #[test]
    fn test_invalid_env_rejected_even_when_overridden() {
        let env = env_of(&[("PING_INTERVAL", "0")]);
        assert!(parse(&["--interval", "5"], &env).is_err());
    }

    #[test]
    fn test_config_summary() {
        let config = Config {
            duration_seconds: Some(90),
            ..Default::default()
        };
        let summary = display_config_summary(&config);

        assert!(summary.contains("Host: 8.8.8.8"));
        assert!(summary.contains("Interval: 5s"));
        assert!(summary.contains("Duration: 90s"));
        assert!(summary.contains("Timeout: 5s"));

        let unbounded = display_config_summary(&Config::default());
        assert!(unbounded.contains("Duration: until interrupted"));
    }
}
