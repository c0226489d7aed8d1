//! File-backed fingerprint source

use crate::audio;
use crate::error::{IntroscanError, Result};
use crate::fingerprint::traits::{FingerprintProvider, FingerprintSource};
use crate::types::Fingerprint;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Loads the first window of a file and hands it to a provider
pub struct FileFingerprintSource {
    provider: Arc<dyn FingerprintProvider>,
    sample_rate: u32,
    window_secs: u32,
}

impl FileFingerprintSource {
    pub fn new(provider: Arc<dyn FingerprintProvider>, sample_rate: u32, window_secs: u32) -> Self {
        Self {
            provider,
            sample_rate,
            window_secs,
        }
    }
}

impl FingerprintSource for FileFingerprintSource {
    fn fingerprint_of(&self, path: &Path) -> Result<Fingerprint> {
        let samples = audio::load_window(path, self.sample_rate, self.window_secs)?;

        let fingerprint = self
            .provider
            .compute(&samples, self.sample_rate, self.window_secs)
            .map_err(|e| match e {
                // Add file context to provider errors
                IntroscanError::ProviderError { reason, .. } => IntroscanError::ProviderError {
                    path: path.to_path_buf(),
                    reason,
                },
                other => other,
            })?;

        debug!(
            "Fingerprinted {} with {}: {} codes",
            path.display(),
            self.provider.name(),
            fingerprint.len()
        );

        Ok(fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingProvider;

    impl FingerprintProvider for CountingProvider {
        fn compute(&self, samples: &[i16], sample_rate: u32, _max: u32) -> Result<Fingerprint> {
            let codes = samples.iter().map(|&s| s as u32).collect::<Vec<_>>();
            Ok(Fingerprint::new(codes, samples.len() as f64 / sample_rate as f64))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct FailingProvider;

    impl FingerprintProvider for FailingProvider {
        fn compute(&self, _: &[i16], _: u32, _: u32) -> Result<Fingerprint> {
            Err(IntroscanError::provider_error("", "library exploded"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn write_payload(dir: &Path, name: &str, samples: &[i16]) -> std::path::PathBuf {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 2,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = dir.join(name);
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_window_is_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_payload(dir.path(), "a.wav", &[1, 2, 3, 4, 5, 6, 7, 8]);
        // 2 Hz * 3 s = 6 samples
        let source = FileFingerprintSource::new(Arc::new(CountingProvider), 2, 3);
        let fp = source.fingerprint_of(&path).unwrap();
        assert_eq!(fp.codes, vec![1, 2, 3, 4, 5, 6]);
        assert!((fp.duration_secs - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_provider_error_gets_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_payload(dir.path(), "b.wav", &[1, 2]);
        let source = FileFingerprintSource::new(Arc::new(FailingProvider), 2, 3);
        match source.fingerprint_of(&path).unwrap_err() {
            IntroscanError::ProviderError { path: p, reason } => {
                assert_eq!(p, path);
                assert_eq!(reason, "library exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
