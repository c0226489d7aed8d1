//! Fingerprinting trait abstractions
//!
//! These traits define the seams between the matching pipeline and the
//! fingerprinting backend. The pipeline only ever sees a `FingerprintSource`,
//! which lets tests feed synthetic fingerprints without touching disk.

use crate::error::Result;
use crate::types::Fingerprint;
use std::path::Path;

/// Fingerprinting backend
pub trait FingerprintProvider: Send + Sync {
    /// Compute a fingerprint from mono 16-bit samples
    ///
    /// At most `max_duration_secs` of audio is used. Must be deterministic.
    fn compute(&self, samples: &[i16], sample_rate: u32, max_duration_secs: u32) -> Result<Fingerprint>;

    /// Get the name of this provider (for logging)
    fn name(&self) -> &'static str;
}

/// Maps a file identifier to its fingerprint
pub trait FingerprintSource: Send + Sync {
    /// Fingerprint the start of `path`
    fn fingerprint_of(&self, path: &Path) -> Result<Fingerprint>;
}
