//! Single-shot latency probes
//!
//! A probe performs exactly one echo attempt against a host and blocks the
//! caller until a reply, an error, or the timeout. [`SystemPing`] shells out
//! to the platform `ping` utility and reads the round-trip time from its
//! report.

pub mod parser;

pub use parser::{parse_latency, EqualsToken, LatencySource, ReplyParser, SpaceToken};

use crate::error::ProbeError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Phrases the common ping implementations print when name lookup fails
const RESOLUTION_FAILURE_MARKERS: &[&str] = &[
    "unknown host",
    "could not find host",
    "name or service not known",
    "temporary failure in name resolution",
    "cannot resolve",
    "no address associated with hostname",
];

/// Phrases that explain a failed echo better than the first output line
const FAILURE_REASON_MARKERS: &[&str] = &[
    "unreachable",
    "timed out",
    "timeout",
    "packet loss",
];

/// Capability to measure round-trip latency to a host
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    /// Perform one echo attempt, returning the latency in milliseconds
    async fn probe(&self, host: &str, timeout: Duration) -> Result<f64, ProbeError>;
}

/// Probe backed by the operating system's `ping` utility
#[derive(Debug)]
pub struct SystemPing {
    program: String,
    parser: ReplyParser,
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPing {
    /// Create a probe using `ping` from `PATH` and the default reply parser
    pub fn new() -> Self {
        Self {
            program: "ping".to_string(),
            parser: ReplyParser::default(),
        }
    }

    /// Use a different executable (e.g. an absolute path)
    pub fn with_program<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    /// Use a custom set of latency sources
    pub fn with_parser(mut self, parser: ReplyParser) -> Self {
        self.parser = parser;
        self
    }

    /// Arguments for a single echo request on the current platform
    pub fn command_args(host: &str, timeout: Duration) -> Vec<String> {
        let mut args = Vec::with_capacity(5);

        #[cfg(target_os = "windows")]
        {
            args.push("-n".to_string());
            args.push("1".to_string());
            args.push("-w".to_string());
            args.push(timeout.as_millis().max(1).to_string());
        }
        #[cfg(target_os = "macos")]
        {
            // macOS -W takes milliseconds
            args.push("-c".to_string());
            args.push("1".to_string());
            args.push("-W".to_string());
            args.push(timeout.as_millis().max(1).to_string());
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            args.push("-c".to_string());
            args.push("1".to_string());
            args.push("-W".to_string());
            args.push(timeout.as_secs().max(1).to_string());
        }

        args.push(host.to_string());
        args
    }

    /// Turn captured process output into a probe outcome
    fn interpret(&self, host: &str, success: bool, stdout: &str, stderr: &str) -> Result<f64, ProbeError> {
        let lowered = format!("{}\n{}", stdout, stderr).to_lowercase();
        if RESOLUTION_FAILURE_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Err(ProbeError::resolution(host));
        }

        if !success {
            let lines: Vec<&str> = stderr
                .lines()
                .chain(stdout.lines())
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            let reason = lines
                .iter()
                .find(|line| {
                    let line = line.to_lowercase();
                    FAILURE_REASON_MARKERS.iter().any(|m| line.contains(m))
                })
                .or_else(|| lines.first())
                .copied()
                .unwrap_or("no reply");
            return Err(ProbeError::unreachable(host, reason));
        }

        self.parser.parse(stdout)
    }
}

/// Reject hosts that are empty or would be read as a command-line option
pub fn validate_host(host: &str) -> Result<(), ProbeError> {
    let trimmed = host.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') || trimmed.chars().any(char::is_whitespace) {
        return Err(ProbeError::InvalidHost(host.to_string()));
    }
    Ok(())
}

#[async_trait]
impl LatencyProbe for SystemPing {
    async fn probe(&self, host: &str, timeout: Duration) -> Result<f64, ProbeError> {
        validate_host(host)?;

        let child = Command::new(&self.program)
            .args(Self::command_args(host, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => return Err(ProbeError::timeout(host, timeout)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.interpret(host, output.status.success(), &stdout, &stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host() {
        assert!(validate_host("8.8.8.8").is_ok());
        assert!(validate_host("example.com").is_ok());
        assert!(validate_host("::1").is_ok());
        assert!(validate_host("").is_err());
        assert!(validate_host("   ").is_err());
        assert!(validate_host("-f").is_err());
        assert!(validate_host("bad host").is_err());
    }

    #[test]
    fn test_command_args_single_packet() {
        let args = SystemPing::command_args("8.8.8.8", Duration::from_secs(5));
        assert_eq!(args.last().map(String::as_str), Some("8.8.8.8"));
        assert!(args.iter().any(|a| a == "1"));
        #[cfg(target_os = "windows")]
        assert_eq!(args[0], "-n");
        #[cfg(not(target_os = "windows"))]
        assert_eq!(args[0], "-c");
    }

    #[test]
    fn test_interpret_success() {
        let ping = SystemPing::new();
        let stdout = "64 bytes from 1.1.1.1: icmp_seq=1 ttl=58 time=9.87 ms\n";
        assert_eq!(ping.interpret("1.1.1.1", true, stdout, "").unwrap(), 9.87);
    }

    #[test]
    fn test_interpret_resolution_failure() {
        let ping = SystemPing::new();
        let err = ping
            .interpret("nope.invalid", false, "", "ping: nope.invalid: Name or service not known\n")
            .unwrap_err();
        assert_eq!(err, ProbeError::resolution("nope.invalid"));
    }

    #[test]
    fn test_interpret_unreachable() {
        let ping = SystemPing::new();
        let stdout = "From 10.0.0.1 icmp_seq=1 Destination Host Unreachable\n";
        let err = ping.interpret("10.0.0.2", false, stdout, "").unwrap_err();
        assert_eq!(err.kind(), "unreachable");
        assert!(err.to_string().contains("Destination Host Unreachable"));

        let stdout = "PING 10.0.0.2 (10.0.0.2) 56(84) bytes of data.\n\n--- 10.0.0.2 ping statistics ---\n1 packets transmitted, 0 received, 100% packet loss, time 0ms\n";
        let err = ping.interpret("10.0.0.2", false, stdout, "").unwrap_err();
        assert!(err.to_string().contains("100% packet loss"));

        let err = ping.interpret("10.0.0.2", false, "", "").unwrap_err();
        assert!(err.to_string().ends_with("no reply"));
    }

    #[test]
    fn test_interpret_unparseable_success() {
        let ping = SystemPing::new();
        let err = ping.interpret("8.8.8.8", true, "all good\n", "").unwrap_err();
        assert_eq!(err.kind(), "unparseable");
    }

    #[tokio::test]
    async fn test_invalid_host_rejected_before_spawn() {
        let ping = SystemPing::new().with_program("definitely-not-a-real-ping-binary");
        let err = ping.probe("-c", Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_host");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let ping = SystemPing::new().with_program("definitely-not-a-real-ping-binary");
        let err = ping.probe("127.0.0.1", Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.kind(), "spawn");
    }
}
