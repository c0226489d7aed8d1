//! Per-file result accumulation

use crate::types::SearchResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Best known match range per file
///
/// A file takes part in up to two pairs; each success widens its stored range
/// to the union of everything seen so far. Owned by the coordinator, which is
/// the only writer.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: BTreeMap<PathBuf, SearchResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the entry for `result.file` to cover `result`
    ///
    /// Commutative and idempotent: the final range is `(min start, max end)`
    /// regardless of merge order or repetition.
    pub fn merge(&mut self, result: SearchResult) {
        match self.results.get_mut(&result.file) {
            Some(existing) => {
                existing.start_secs = existing.start_secs.min(result.start_secs);
                existing.end_secs = existing.end_secs.max(result.end_secs);
            }
            None => {
                self.results.insert(result.file.clone(), result);
            }
        }
    }

    pub fn get(&self, file: &Path) -> Option<&SearchResult> {
        self.results.get(file)
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.results.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results, sorted by file
    pub fn into_sorted(self) -> Vec<SearchResult> {
        self.results.into_values().collect()
    }
}
