//! Similarity scoring between fingerprint codes

use crate::error::{IntroscanError, Result};

/// Width of a fingerprint code in bits
pub const CODE_BITS: u32 = u32::BITS;

/// Hamming distance between two codes
#[inline]
pub fn bit_distance(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Compare two equal-length code sequences
///
/// Returns the fraction of matching bits, in `[0.0, 1.0]`.
/// Fails for empty or mismatched inputs.
pub fn compare_codes(a: &[u32], b: &[u32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(IntroscanError::ScoreError(format!(
            "sequence lengths differ ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(IntroscanError::ScoreError(
            "cannot compare empty sequences".to_string(),
        ));
    }

    let differing: u64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| bit_distance(x, y) as u64)
        .sum();
    let total = a.len() as u64 * CODE_BITS as u64;

    Ok(1.0 - differing as f64 / total as f64)
}

/// Similarity of two code windows, degrading to `0.0` instead of failing
pub fn match_score(a: &[u32], b: &[u32]) -> f64 {
    compare_codes(a, b).unwrap_or(0.0)
}

/// Bit distance of every aligned code pair
pub fn distance_sequence(a: &[u32], b: &[u32]) -> Vec<u32> {
    a.iter().zip(b).map(|(&x, &y)| bit_distance(x, y)).collect()
}
