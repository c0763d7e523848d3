//! Latency extraction from echo utility output
//!
//! Different platforms print the round-trip time differently. Each
//! [`LatencySource`] understands one convention; [`ReplyParser`] tries them
//! in order and returns the first hit.

use crate::error::ProbeError;
use regex::Regex;
use std::sync::LazyLock;

static EQUALS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"time=\s*(\d+(?:\.\d+)?)\s*ms").ok());

static SPACE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\btime\s+(\d+(?:\.\d+)?)\s*ms").ok());

/// One textual convention for reporting a round-trip time
pub trait LatencySource: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Pull a latency in milliseconds out of raw output, if this convention matches
    fn extract(&self, output: &str) -> Option<f64>;
}

/// `time=12.3 ms` as printed by iputils, BSD and macOS ping
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsToken;

/// `time 12.3ms` as printed by some Windows builds and busybox variants
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceToken;

impl LatencySource for EqualsToken {
    fn name(&self) -> &'static str {
        "time="
    }

    fn extract(&self, output: &str) -> Option<f64> {
        capture_latency(EQUALS_PATTERN.as_ref()?, output)
    }
}

impl LatencySource for SpaceToken {
    fn name(&self) -> &'static str {
        "time <value>"
    }

    fn extract(&self, output: &str) -> Option<f64> {
        capture_latency(SPACE_PATTERN.as_ref()?, output)
    }
}

fn capture_latency(pattern: &Regex, output: &str) -> Option<f64> {
    let captures = pattern.captures(output)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Ordered set of latency sources
pub struct ReplyParser {
    sources: Vec<Box<dyn LatencySource>>,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new()
            .with_source(EqualsToken)
            .with_source(SpaceToken)
    }
}

impl std::fmt::Debug for ReplyParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyParser")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl ReplyParser {
    /// Create a parser with no sources
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Append a source; earlier sources win
    pub fn with_source<S: LatencySource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Names of the configured sources, in priority order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Extract a latency using the first matching source
    pub fn parse(&self, output: &str) -> Result<f64, ProbeError> {
        self.sources
            .iter()
            .find_map(|source| source.extract(output))
            .ok_or_else(|| ProbeError::unparseable(summarize(output)))
    }
}

/// Parse a latency with the default set of sources
pub fn parse_latency(output: &str) -> Result<f64, ProbeError> {
    ReplyParser::default().parse(output)
}

/// First non-empty line of the output, for error messages
fn summarize(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("<empty output>")
        .chars()
        .take(120)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINUX_REPLY: &str = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.\n\
        64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=12.5 ms\n\n\
        --- 8.8.8.8 ping statistics ---\n\
        1 packets transmitted, 1 received, 0% packet loss, time 0ms\n\
        rtt min/avg/max/mdev = 12.500/12.500/12.500/0.000 ms\n";

    const WINDOWS_REPLY: &str = "Pinging 8.8.8.8 with 32 bytes of data:\r\n\
        Reply from 8.8.8.8: bytes=32 time=14ms TTL=117\r\n";

    #[test]
    fn test_equals_token_linux() {
        assert_eq!(EqualsToken.extract(LINUX_REPLY), Some(12.5));
        assert_eq!(parse_latency(LINUX_REPLY).unwrap(), 12.5);
    }

    #[test]
    fn test_equals_token_without_space() {
        assert_eq!(parse_latency(WINDOWS_REPLY).unwrap(), 14.0);
    }

    #[test]
    fn test_space_token() {
        assert_eq!(SpaceToken.extract("reply: time 7.25ms"), Some(7.25));
        assert_eq!(parse_latency("reply: time 7.25ms").unwrap(), 7.25);
        assert_eq!(EqualsToken.extract("reply: time 7.25ms"), None);
    }

    #[test]
    fn test_equals_preferred_over_space() {
        // The summary line of iputils also carries "time 0ms"
        assert_eq!(parse_latency(LINUX_REPLY).unwrap(), 12.5);
    }

    #[test]
    fn test_unparseable_output() {
        let err = parse_latency("Request timed out.\n").unwrap_err();
        assert_eq!(err.kind(), "unparseable");
        assert!(err.to_string().contains("Request timed out."));

        let err = parse_latency("").unwrap_err();
        assert!(err.to_string().contains("<empty output>"));
    }

    #[test]
    fn test_custom_source_order() {
        let parser = ReplyParser::new().with_source(SpaceToken);
        assert_eq!(parser.source_names(), vec!["time <value>"]);
        assert!(parser.parse("time=3.0 ms").is_err());
        assert_eq!(parser.parse("time 3.0 ms").unwrap(), 3.0);
    }

    #[test]
    fn test_default_parser_sources() {
        let parser = ReplyParser::default();
        assert_eq!(parser.source_names(), vec!["time=", "time <value>"]);
    }

    proptest! {
        #[test]
        fn equals_form_parses_exact_value(x in 0.0f64..100_000.0) {
            let output = format!("64 bytes from host: icmp_seq=1 time={}ms", x);
            prop_assert_eq!(parse_latency(&output).unwrap(), x);
        }

        #[test]
        fn space_form_parses_exact_value(x in 0.0f64..100_000.0) {
            let output = format!("Reply from host: time {}ms TTL=52", x);
            prop_assert_eq!(parse_latency(&output).unwrap(), x);
        }
    }
}
