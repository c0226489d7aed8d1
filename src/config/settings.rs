//! Runtime configuration settings

use crate::error::{IntroscanError, Result};
use crate::matching::MatchConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of seconds fingerprinted from the start of each file
pub const DEFAULT_WINDOW_SECS: u32 = 180;

/// Default sample rate of the input files
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Default bit distance below which two codes count as matching
pub const DEFAULT_BIT_DISTANCE_THRESHOLD: u32 = 8;

/// Default minimum length of a reported common region, in seconds
pub const DEFAULT_MIN_MATCH_SECS: f64 = 5.0;

/// Default worker pool size
pub const DEFAULT_WORKERS: usize = 5;

/// Default capacity of the work and outcome queues
pub const DEFAULT_QUEUE_CAPACITY: usize = 30;

/// Runtime settings for the comparison pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory containing the recordings
    pub input: PathBuf,
    /// Extension of the files to compare (without the dot)
    pub extension: String,
    /// Scan recursively
    pub recursive: bool,
    /// Seconds from the start of each file to fingerprint
    pub window_secs: u32,
    /// Sample rate of the raw input samples
    pub sample_rate: u32,
    /// Bit distance threshold for the region detector
    pub bit_distance_threshold: u32,
    /// Minimum significant match length in seconds
    pub min_match_secs: f64,
    /// Number of parallel workers
    pub workers: usize,
    /// Capacity of the bounded work queue
    pub queue_capacity: usize,
    /// Longest wait for the next pair outcome before giving up on the rest
    pub pair_timeout: Option<Duration>,
    /// Optional JSON report path
    pub json_output: Option<PathBuf>,
    /// Show progress bar
    pub show_progress: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self {
            input: cli.input.clone(),
            extension: cli.extension.trim_start_matches('.').to_string(),
            recursive: cli.recursive,
            window_secs: cli.window,
            sample_rate: cli.sample_rate,
            bit_distance_threshold: cli.threshold,
            min_match_secs: cli.min_length,
            workers: cli.workers,
            queue_capacity: cli.queue_capacity,
            pair_timeout: cli.pair_timeout.map(Duration::from_secs),
            json_output: cli.json.clone(),
            show_progress: !cli.quiet,
        }
    }

    /// Parameters of the pair analyzer
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            bit_distance_threshold: self.bit_distance_threshold,
            min_match_secs: self.min_match_secs,
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(IntroscanError::ConfigError(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(IntroscanError::ConfigError(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        if self.window_secs == 0 {
            return Err(IntroscanError::ConfigError(
                "analysis window must be at least 1 second".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(IntroscanError::ConfigError(
                "sample rate must be greater than 0".to_string(),
            ));
        }
        if self.bit_distance_threshold == 0 {
            return Err(IntroscanError::ConfigError(
                "bit distance threshold must be at least 1".to_string(),
            ));
        }
        if !self.min_match_secs.is_finite() || self.min_match_secs < 0.0 {
            return Err(IntroscanError::ConfigError(format!(
                "minimum match length must be a non-negative number of seconds, got {}",
                self.min_match_secs
            )));
        }
        if self.extension.is_empty() {
            return Err(IntroscanError::ConfigError(
                "file extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            extension: "wav".to_string(),
            recursive: false,
            window_secs: DEFAULT_WINDOW_SECS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_distance_threshold: DEFAULT_BIT_DISTANCE_THRESHOLD,
            min_match_secs: DEFAULT_MIN_MATCH_SECS,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            pair_timeout: None,
            json_output: None,
            show_progress: true,
        }
    }
}
