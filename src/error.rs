//! Unified error types for introscan
//!
//! Error strategy:
//! - Per-pair errors (load, fingerprint, no match): Recoverable, report the pair and continue
//! - System errors (input directory, configuration, report output): Fatal, abort the run
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for introscan operations
#[derive(Debug, Error)]
pub enum IntroscanError {
    // =========================================================================
    // Recoverable errors - fail the pair, continue the run
    // =========================================================================
    #[error("Failed to load audio file '{path}': {reason}\n  Tip: Only 16-bit PCM WAV files with a 'data' chunk are supported")]
    LoadError { path: PathBuf, reason: String },

    #[error("Fingerprinting failed for '{path}': {reason}")]
    ProviderError { path: PathBuf, reason: String },

    #[error("No significant common region: {reason}")]
    NoMatch { reason: String },

    #[error("Fingerprint comparison failed: {0}")]
    ScoreError(String),

    #[error("Worker panicked while comparing pair: {0}")]
    WorkerPanicked(String),

    #[error("Pair comparison did not finish in time")]
    TimedOut,

    // =========================================================================
    // Fatal errors - abort the entire run
    // =========================================================================
    #[error("Input directory not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    InputNotFound(PathBuf),

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for introscan operations
pub type Result<T> = std::result::Result<T, IntroscanError>;

impl IntroscanError {
    /// Returns true if this error only affects a single pair (report it, continue the run)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IntroscanError::LoadError { .. }
                | IntroscanError::ProviderError { .. }
                | IntroscanError::NoMatch { .. }
                | IntroscanError::ScoreError(_)
                | IntroscanError::WorkerPanicked(_)
                | IntroscanError::TimedOut
        )
    }

    /// Returns true for the expected "these files simply do not overlap" outcome
    pub fn is_no_match(&self) -> bool {
        matches!(self, IntroscanError::NoMatch { .. })
    }

    /// Create a load error with context about the issue
    pub fn load_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IntroscanError::LoadError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a fingerprint provider error
    pub fn provider_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IntroscanError::ProviderError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-match outcome
    pub fn no_match(reason: impl Into<String>) -> Self {
        IntroscanError::NoMatch {
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!("Directory does not exist: {}", path.parent().map(|p| p.display().to_string()).unwrap_or_default())
            }
            _ => err.to_string(),
        };
        IntroscanError::OutputError { path, reason }
    }
}
