//! Chromaprint based fingerprinting
//!
//! Uses rusty-chromaprint, a pure-Rust port of Chromaprint, and returns the raw
//! (uncompressed) 32-bit codes.

use crate::error::{IntroscanError, Result};
use crate::fingerprint::traits::FingerprintProvider;
use crate::types::Fingerprint;
use rusty_chromaprint::{Configuration, Fingerprinter};
use std::path::PathBuf;
use tracing::debug;

/// Fingerprint provider backed by rusty-chromaprint
///
/// Uses `preset_test2`, Chromaprint's default algorithm.
pub struct ChromaprintProvider {
    config: Configuration,
}

impl ChromaprintProvider {
    pub fn new() -> Self {
        Self {
            config: Configuration::preset_test2(),
        }
    }

    fn failure(reason: impl Into<String>) -> IntroscanError {
        // The source attaches the real path
        IntroscanError::provider_error(PathBuf::new(), reason)
    }
}

impl Default for ChromaprintProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintProvider for ChromaprintProvider {
    fn compute(&self, samples: &[i16], sample_rate: u32, max_duration_secs: u32) -> Result<Fingerprint> {
        if sample_rate == 0 {
            return Err(Self::failure("sample rate must be greater than 0"));
        }

        let max_samples = sample_rate as usize * max_duration_secs as usize;
        let samples = &samples[..samples.len().min(max_samples)];
        if samples.is_empty() {
            return Err(Self::failure("No audio samples available"));
        }

        debug!(
            "Fingerprinting with chromaprint ({} samples, {}Hz)",
            samples.len(),
            sample_rate
        );

        let mut printer = Fingerprinter::new(&self.config);
        printer
            .start(sample_rate, 1)
            .map_err(|e| Self::failure(format!("Failed to start fingerprinter: {:?}", e)))?;
        printer.consume(samples);
        printer.finish();

        let codes = printer.fingerprint().to_vec();
        if codes.is_empty() {
            return Err(Self::failure(
                "Chromaprint returned an empty fingerprint (audio too short?)",
            ));
        }

        let duration_secs = samples.len() as f64 / sample_rate as f64;
        debug!("Computed {} codes over {:.2}s", codes.len(), duration_secs);

        Ok(Fingerprint::new(codes, duration_secs))
    }

    fn name(&self) -> &'static str {
        "chromaprint"
    }
}
