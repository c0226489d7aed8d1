//! Match region detection over an aligned distance sequence

use crate::types::MatchRegion;

/// Number of following positions averaged when judging a position
const LOOKAHEAD: usize = 3;

/// Find the span of positions that stay under `threshold`
///
/// A position is good when its own distance and the mean of the next three
/// distances are both below `threshold`. The last three positions have no
/// full lookahead and are never good. The region runs from the first good
/// position to the last one; bad positions in between do not split it.
pub fn find_region(distances: &[u32], threshold: u32) -> Option<MatchRegion> {
    let mut region: Option<MatchRegion> = None;

    for index in 0..distances.len() {
        if !is_good(distances, index, threshold) {
            continue;
        }
        region = Some(match region {
            Some(r) => MatchRegion {
                start: r.start,
                end: index,
            },
            None => MatchRegion {
                start: index,
                end: index,
            },
        });
    }

    region
}

fn is_good(distances: &[u32], index: usize, threshold: u32) -> bool {
    if index + LOOKAHEAD >= distances.len() || distances[index] >= threshold {
        return false;
    }

    // mean < threshold  <=>  sum < LOOKAHEAD * threshold
    let ahead: u64 = distances[index + 1..=index + LOOKAHEAD]
        .iter()
        .map(|&d| d as u64)
        .sum();
    ahead < LOOKAHEAD as u64 * threshold as u64
}
