//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// introscan - Find shared intros and outros between neighbouring recordings
///
/// Fingerprints the start of every recording in a directory, aligns each file
/// with the next one in sorted order, and reports the time range where they
/// share the same audio.
#[derive(Parser, Debug)]
#[command(name = "introscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory containing the recordings
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// File extension of the recordings to compare
    #[arg(short, long, value_name = "EXT", default_value = "wav")]
    pub extension: String,

    /// Seconds from the start of each file to fingerprint
    #[arg(long, value_name = "SECS", default_value_t = 180)]
    pub window: u32,

    /// Sample rate of the input files in Hz
    #[arg(long, value_name = "HZ", default_value_t = 48000)]
    pub sample_rate: u32,

    /// Codes must differ by fewer than this many bits to count as matching
    #[arg(long, value_name = "BITS", default_value_t = 8)]
    pub threshold: u32,

    /// Minimum length of a common region to be reported, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5.0)]
    pub min_length: f64,

    /// Number of parallel workers
    #[arg(short = 'j', long, value_name = "N", default_value_t = 5)]
    pub workers: usize,

    /// Capacity of the pending work queue
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub queue_capacity: usize,

    /// Give up on outstanding pairs when no comparison finishes for this many seconds
    #[arg(long, value_name = "SECS")]
    pub pair_timeout: Option<u64>,

    /// Scan subdirectories recursively
    #[arg(short, long, default_value = "false")]
    pub recursive: bool,

    /// Compare these two files directly instead of scanning a directory
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"], conflicts_with = "json")]
    pub pair: Option<Vec<PathBuf>>,

    /// Also write the report as JSON to this path
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bar)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
