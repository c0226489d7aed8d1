//! WAV loading
//!
//! Opens a RIFF/WAVE file with hound, checks that it holds 16-bit integer
//! mono PCM at the configured rate and reads the first window of samples.
//! No resampling or channel mixing happens here.

use crate::error::{IntroscanError, Result};
use hound::{SampleFormat, WavReader, WavSpec};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// The only sample width the fingerprinter is fed
const BITS_PER_SAMPLE: u16 = 16;

/// Open a WAV file positioned at the start of its sample payload
///
/// hound walks the chunk list, so metadata chunks before or after `data` are
/// skipped by their declared sizes.
pub fn open_wav(path: &Path) -> Result<WavReader<BufReader<File>>> {
    let reader = WavReader::open(path)
        .map_err(|e| IntroscanError::load_error(path, format!("Not a readable WAV file: {}", e)))?;
    trace!("Opened {}: {:?}", path.display(), reader.spec());
    Ok(reader)
}

/// Reject anything other than 16-bit integer mono PCM at `sample_rate`
pub fn check_format(spec: &WavSpec, sample_rate: u32) -> std::result::Result<(), String> {
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(format!(
            "Unsupported sample format: {:?} {}-bit (expected 16-bit integer PCM)",
            spec.sample_format, spec.bits_per_sample
        ));
    }
    if spec.channels != 1 {
        return Err(format!(
            "Expected mono audio, found {} channels",
            spec.channels
        ));
    }
    if spec.sample_rate != sample_rate {
        return Err(format!(
            "Sample rate is {} Hz, expected {} Hz",
            spec.sample_rate, sample_rate
        ));
    }
    Ok(())
}

/// Number of samples in `window_secs` of mono audio
pub fn window_len(sample_rate: u32, window_secs: u32) -> usize {
    sample_rate as usize * window_secs as usize
}

/// Read at most `window_secs` of samples from an open reader
pub fn read_window<R: Read>(
    path: &Path,
    mut reader: WavReader<R>,
    sample_rate: u32,
    window_secs: u32,
) -> Result<Vec<i16>> {
    check_format(&reader.spec(), sample_rate).map_err(|reason| IntroscanError::load_error(path, reason))?;

    reader
        .samples::<i16>()
        .take(window_len(sample_rate, window_secs))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| IntroscanError::load_error(path, format!("Failed to read samples: {}", e)))
}

/// Load the first window of a file as mono samples
pub fn load_window(path: &Path, sample_rate: u32, window_secs: u32) -> Result<Vec<i16>> {
    let reader = open_wav(path)?;
    let samples = read_window(path, reader, sample_rate, window_secs)?;

    debug!(
        "Loaded {} samples ({:.2}s) from {}",
        samples.len(),
        samples.len() as f64 / sample_rate.max(1) as f64,
        path.display()
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn mono_spec(sample_rate: u32) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    fn wav_bytes(spec: WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    /// Byte offset of the `data` chunk header, found by walking the chunk list
    fn data_chunk_offset(bytes: &[u8]) -> usize {
        let mut pos = 12;
        loop {
            let id = &bytes[pos..pos + 4];
            if id == b"data" {
                return pos;
            }
            let size = u32::from_le_bytes(bytes[pos + 4..pos + 8].try_into().unwrap()) as usize;
            pos += 8 + size + size % 2;
        }
    }

    /// A LIST/INFO chunk whose title contains the text "data"
    fn list_chunk() -> Vec<u8> {
        let title = b"metadata\0";
        let mut body = b"INFO".to_vec();
        body.extend_from_slice(b"INAM");
        body.extend_from_slice(&(title.len() as u32).to_le_bytes());
        body.extend_from_slice(title);
        body.push(0); // word alignment

        let mut chunk = b"LIST".to_vec();
        chunk.extend_from_slice(&(body.len() as u32).to_le_bytes());
        chunk.extend_from_slice(&body);
        chunk
    }

    fn fix_riff_size(bytes: &mut [u8]) {
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
    }

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_metadata_chunk_before_data_is_skipped() {
        let mut bytes = wav_bytes(mono_spec(8000), &[100, 200, 300, 400]);
        let at = data_chunk_offset(&bytes);
        bytes.splice(at..at, list_chunk());
        fix_riff_size(&mut bytes);

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "tagged.wav", &bytes);
        assert_eq!(load_window(&path, 8000, 10).unwrap(), vec![100, 200, 300, 400]);
    }

    #[test]
    fn test_trailing_chunk_is_not_read_as_samples() {
        let mut bytes = wav_bytes(mono_spec(8000), &[1, 2, 3]);
        bytes.extend_from_slice(&list_chunk());
        fix_riff_size(&mut bytes);

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "trailer.wav", &bytes);
        assert_eq!(load_window(&path, 8000, 10).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_caps_samples() {
        let samples: Vec<i16> = (0..100).collect();
        let bytes = wav_bytes(mono_spec(10), &samples);
        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        // 10 Hz * 3 s
        let window = read_window(Path::new("a.wav"), reader, 10, 3).unwrap();
        assert_eq!(window, (0..30).collect::<Vec<i16>>());
    }

    #[test]
    fn test_sample_rate_mismatch_is_load_error() {
        let bytes = wav_bytes(mono_spec(44100), &[0; 16]);
        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let err = read_window(Path::new("a.wav"), reader, 48000, 10).unwrap_err();
        assert!(matches!(err, IntroscanError::LoadError { .. }));
        assert!(err.to_string().contains("44100"));
    }

    #[test]
    fn test_stereo_is_rejected() {
        let spec = WavSpec {
            channels: 2,
            ..mono_spec(48000)
        };
        assert!(check_format(&spec, 48000).unwrap_err().contains("mono"));
    }

    #[test]
    fn test_non_16_bit_is_rejected() {
        let spec = WavSpec {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
            ..mono_spec(48000)
        };
        assert!(check_format(&spec, 48000).is_err());
        assert!(check_format(&mono_spec(48000), 48000).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_window(Path::new("/definitely/not/here.wav"), 48000, 10).unwrap_err();
        assert!(matches!(err, IntroscanError::LoadError { .. }));
    }

    #[test]
    fn test_load_window_rejects_non_wav() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.wav", b"just some text");
        let err = load_window(&path, 48000, 10).unwrap_err();
        assert!(matches!(err, IntroscanError::LoadError { .. }));
    }
}
