//! Fingerprint providers and sources
//!
//! The trait abstraction allows swapping the fingerprinting backend, or
//! replacing files with in-memory fingerprints, without changing pipeline code.

pub mod chromaprint;
pub mod source;
pub mod traits;

pub use chromaprint::ChromaprintProvider;
pub use source::FileFingerprintSource;
pub use traits::{FingerprintProvider, FingerprintSource};
