//! Pair comparison pipeline
//!
//! - `analyzer`: one pair, fingerprint to seconds
//! - `store`: per-file union of partial results
//! - `orchestrator`: worker pool, completion accounting and reporting

pub mod analyzer;
pub mod orchestrator;
pub mod store;

pub use analyzer::{analyze_pair, match_fingerprints};
pub use orchestrator::{compare_files, pair_up, run, run_pair, PairFailure, PipelineReport};
pub use store::ResultStore;
