//! Fingerprint matching engine
//!
//! - `score`: bit distance and window similarity
//! - `alignment`: full sweep for the best offset between two fingerprints
//! - `region`: smoothed detection of the matching span

pub mod alignment;
pub mod region;
pub mod score;

pub use alignment::{aligned_windows, best_offset};
pub use region::find_region;
pub use score::{bit_distance, compare_codes, distance_sequence, match_score};

use crate::config::settings::{DEFAULT_BIT_DISTANCE_THRESHOLD, DEFAULT_MIN_MATCH_SECS};

/// Parameters for judging whether an aligned pair shares a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Codes closer than this many bits count as matching
    pub bit_distance_threshold: u32,
    /// Shortest region, in seconds, that is reported
    pub min_match_secs: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bit_distance_threshold: DEFAULT_BIT_DISTANCE_THRESHOLD,
            min_match_secs: DEFAULT_MIN_MATCH_SECS,
        }
    }
}
