//! Output validation tests for the ping monitor
//!
//! A stub `ping` script is placed first on `PATH` so the real binary can be
//! driven end to end without touching the network.

#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Validation patterns for the line-oriented output
struct OutputPatterns {
    /// A successful status line
    pub success_line: Regex,
    /// A failed status line
    pub failure_line: Regex,
    /// The banner's settings line
    pub settings_line: Regex,
}

impl Default for OutputPatterns {
    fn default() -> Self {
        Self {
            success_line: Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} \| ✓ OK \| Ping: \d+\.\d{2}ms$").unwrap(),
            failure_line: Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} \| ✗ FAILED \| Connection lost!").unwrap(),
            settings_line: Regex::new(r"^Interval: \d+s \| Duration: (\d+s|Infinite) \| Timeout: \d+s$").unwrap(),
        }
    }
}

/// Write an executable `ping` stub into `dir`
fn install_ping_stub(dir: &Path, script: &str) {
    let path = dir.join("ping");
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
}

/// Run `pingmon` for two probes against a stubbed `ping`
fn run_with_stub(script: &str, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let dir = TempDir::new().unwrap();
    install_ping_stub(dir.path(), script);

    let path = format!("{}:{}", dir.path().display(), std::env::var("PATH").unwrap_or_default());
    let mut cmd = Command::cargo_bin("pingmon").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", path)
        .env_remove("PING_HOST")
        .env_remove("PING_DURATION")
        .args(["--host", "192.0.2.10", "--interval", "1", "--duration", "2", "--timeout", "2", "--no-color"])
        .args(extra_args);
    cmd.assert()
}

fn stdout_lines(assert: &assert_cmd::assert::Assert) -> Vec<String> {
    String::from_utf8_lossy(&assert.get_output().stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_successful_run_output_format() {
    let patterns = OutputPatterns::default();
    let assert = run_with_stub(
        "echo '64 bytes from 192.0.2.10: icmp_seq=1 ttl=57 time=12.5 ms'",
        &[],
    )
    .success();

    let lines = stdout_lines(&assert);
    assert_eq!(lines[0], "Starting ping monitor for 192.0.2.10...");
    assert!(patterns.settings_line.is_match(&lines[1]), "bad settings line: {}", lines[1]);

    let successes: Vec<&String> = lines.iter().filter(|l| patterns.success_line.is_match(l)).collect();
    assert_eq!(successes.len(), 2);
    assert!(successes.iter().all(|l| l.ends_with("Ping: 12.50ms")));

    let text = lines.join("\n");
    assert!(text.contains("Monitoring duration reached."));
    assert!(text.contains("Packets received: 2"));
    assert!(text.contains("Min ping: 12.50ms"));
    assert!(text.contains("Max ping: 12.50ms"));
    assert!(text.contains("Avg ping: 12.50ms"));
    assert!(text.contains("Std Dev: 0.00ms"));
}

#[test]
fn test_failed_probes_output_format() {
    let patterns = OutputPatterns::default();
    let assert = run_with_stub("echo 'Request timeout for icmp_seq 0'; exit 1", &[]).success();

    let lines = stdout_lines(&assert);
    assert_eq!(lines.iter().filter(|l| patterns.failure_line.is_match(l)).count(), 2);
    assert!(!lines.iter().any(|l| patterns.success_line.is_match(l)));
    assert!(lines.iter().any(|l| l == "No successful pings recorded. (2 attempts failed)"));
}

#[test]
fn test_unparseable_reply_counts_as_failure() {
    let assert = run_with_stub("echo 'PONG'", &["--verbose"]).success();

    let text = stdout_lines(&assert).join("\n");
    assert!(text.contains("✗ FAILED | Connection lost! ("));
    assert!(text.contains("No successful pings recorded."));
}

#[test]
fn test_resolution_failure_reported_in_verbose_mode() {
    run_with_stub("echo 'ping: nowhere.invalid: Name or service not known' >&2; exit 2", &["--verbose"])
        .success()
        .stdout(predicate::str::contains("✗ FAILED"))
        .stderr(predicate::str::contains("Error pinging 192.0.2.10"));
}
