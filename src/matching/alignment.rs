//! Offset search between two fingerprints
//!
//! Sweeps every signed shift between `-L/2` and `+L/2` and keeps the one whose
//! overlapping windows score highest.

use crate::matching::score::match_score;

/// Overlapping windows of `f1` and `f2` for a given offset
///
/// A positive offset skips `offset` codes at the start of `f1`, a negative one
/// skips `|offset|` codes at the start of `f2`. Both windows have length
/// `min(len) - |offset|`, or zero when the offset exceeds the shorter input.
pub fn aligned_windows<'a>(offset: i64, f1: &'a [u32], f2: &'a [u32]) -> (&'a [u32], &'a [u32]) {
    let len = f1.len().min(f2.len());
    let shift = offset.unsigned_abs() as usize;
    if shift >= len {
        return (&f1[..0], &f2[..0]);
    }

    let overlap = len - shift;
    let (start1, start2) = if offset >= 0 { (shift, 0) } else { (0, shift) };
    (
        &f1[start1..start1 + overlap],
        &f2[start2..start2 + overlap],
    )
}

/// Find the shift at which `f1` and `f2` line up best
///
/// Positive: the shared content sits later in `f1` than in `f2`.
///
/// Candidates are scanned from `+L/2` down to `-L/2`; on equal scores the first
/// one scanned wins, so ties resolve towards positive offsets.
pub fn best_offset(f1: &[u32], f2: &[u32]) -> i64 {
    let len = f1.len().min(f2.len());
    let half = (len / 2) as i64;

    let mut best: Option<(i64, f64)> = None;
    for offset in (-half..=half).rev() {
        let (w1, w2) = aligned_windows(offset, f1, f2);
        let score = match_score(w1, w2);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((offset, score)),
        }
    }

    best.map(|(offset, _)| offset).unwrap_or(0)
}
