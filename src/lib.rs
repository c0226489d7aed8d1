//! introscan - Shared intro/outro detection for audio recordings
//!
//! Fingerprints the start of every recording in a directory, aligns each file
//! with its successor in sorted order, and reports the time range in each file
//! where the two share the same audio.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `discovery`: File scanning
//! - `audio`: Raw PCM loading from WAV files
//! - `fingerprint`: Fingerprint providers (chromaprint) and sources
//! - `matching`: Offset search, bit distance and region detection
//! - `pipeline`: Pair analysis, worker pool and result merging
//! - `export`: Console and JSON reports
//!
//! # Example
//!
//! ```no_run
//! use introscan::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let report = pipeline::run(&settings).expect("Comparison failed");
//! println!("Matched {} of {} files", report.found.len(), report.total_files);
//! ```

pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod matching;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{IntroscanError, Result};
pub use types::{Fingerprint, MatchRegion, PairMatch, SearchResult, WorkPair};
