//! Core data types for introscan
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// Fingerprints
// =============================================================================

/// Acoustic fingerprint of the start of one recording
///
/// One 32-bit code per short, fixed-size audio window.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    /// Ordered acoustic codes
    pub codes: Vec<u32>,
    /// Seconds of audio the codes summarize
    pub duration_secs: f64,
}

impl Fingerprint {
    pub fn new(codes: Vec<u32>, duration_secs: f64) -> Self {
        Self {
            codes,
            duration_secs,
        }
    }

    /// Number of codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the fingerprint holds no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Seconds of audio covered by a single code
    pub fn seconds_per_code(&self) -> f64 {
        // Guard against division by zero for an empty fingerprint
        if self.codes.is_empty() {
            0.0
        } else {
            self.duration_secs / self.codes.len() as f64
        }
    }
}

// =============================================================================
// Work units and results
// =============================================================================

/// One file-to-file comparison unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkPair {
    pub first: PathBuf,
    pub second: PathBuf,
}

impl WorkPair {
    pub fn new(first: impl Into<PathBuf>, second: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl std::fmt::Display for WorkPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", display_name(&self.first), display_name(&self.second))
    }
}

/// Inclusive index span into a distance sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRegion {
    pub start: usize,
    pub end: usize,
}

impl MatchRegion {
    /// Number of positions between start and end
    pub fn span(&self) -> usize {
        self.end - self.start
    }
}

/// Time range, in the named file's own timeline, where it overlaps its neighbour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub file: PathBuf,
    pub start_secs: f64,
    pub end_secs: f64,
}

impl SearchResult {
    pub fn new(file: impl Into<PathBuf>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            file: file.into(),
            start_secs,
            end_secs,
        }
    }

    /// Length of the matched range in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Successful comparison of one pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairMatch {
    /// Best alignment, in fingerprint positions
    pub offset: i64,
    /// Similarity of the aligned windows, 0 to 1
    pub score: f64,
    pub first: SearchResult,
    pub second: SearchResult,
}

/// File name for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
