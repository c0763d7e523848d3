//! Data models and structures for the ping monitor

pub mod config;
pub mod sample;

// Re-export main model types
pub use config::Config;
pub use sample::{ProbeOutcome, RunLog, Sample, StatusLine};
