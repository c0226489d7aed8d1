//! Pair analysis
//!
//! Fingerprints both files of a pair, aligns them, detects the shared region
//! and converts it to seconds in each file's own timeline.

use crate::error::{IntroscanError, Result};
use crate::fingerprint::FingerprintSource;
use crate::matching::{
    aligned_windows, best_offset, distance_sequence, find_region, match_score, MatchConfig,
};
use crate::types::{Fingerprint, PairMatch, SearchResult, WorkPair};
use std::path::Path;
use tracing::debug;

/// Compare one pair of files
pub fn analyze_pair(
    pair: &WorkPair,
    source: &dyn FingerprintSource,
    config: &MatchConfig,
) -> Result<PairMatch> {
    debug!("Analyzing pair: {}", pair);

    let first = source.fingerprint_of(&pair.first)?;
    let second = source.fingerprint_of(&pair.second)?;

    match_fingerprints(&pair.first, &first, &pair.second, &second, config)
}

/// Find the shared region of two already computed fingerprints
pub fn match_fingerprints(
    first_path: &Path,
    first: &Fingerprint,
    second_path: &Path,
    second: &Fingerprint,
    config: &MatchConfig,
) -> Result<PairMatch> {
    // Offset symmetry needs an even comparison length
    let len = first.len().min(second.len()) & !1;
    if len < 2 {
        return Err(IntroscanError::no_match(format!(
            "fingerprints too short to compare ({} and {} codes)",
            first.len(),
            second.len()
        )));
    }
    let codes1 = &first.codes[..len];
    let codes2 = &second.codes[..len];

    let offset = best_offset(codes1, codes2);
    let (window1, window2) = aligned_windows(offset, codes1, codes2);
    let score = match_score(window1, window2);
    let distances = distance_sequence(window1, window2);

    let region = find_region(&distances, config.bit_distance_threshold)
        .ok_or_else(|| IntroscanError::no_match("no common region found"))?;

    let seconds_per_code = first.seconds_per_code();
    let common_start = region.start as f64 * seconds_per_code;
    let common_end = region.end as f64 * seconds_per_code;
    let region_secs = region.span() as f64 * seconds_per_code;

    if region_secs < config.min_match_secs {
        return Err(IntroscanError::no_match(format!(
            "common region of {:.1}s is shorter than {:.1}s",
            region_secs, config.min_match_secs
        )));
    }

    let offset_secs = offset.unsigned_abs() as f64 * seconds_per_code;
    let (first_shift, second_shift) = if offset >= 0 {
        (offset_secs, 0.0)
    } else {
        (0.0, offset_secs)
    };

    debug!(
        "Matched {} and {}: offset {} codes, score {:.3}, region {}..{} ({:.1}s)",
        first_path.display(),
        second_path.display(),
        offset,
        score,
        region.start,
        region.end,
        region_secs
    );

    Ok(PairMatch {
        offset,
        score,
        first: SearchResult::new(
            first_path,
            common_start + first_shift,
            common_end + first_shift,
        ),
        second: SearchResult::new(
            second_path,
            common_start + second_shift,
            common_end + second_shift,
        ),
    })
}
