//! Pipeline orchestration
//!
//! Coordinates file discovery, parallel pair comparison, and result merging.
//! Pairs flow through a bounded job queue to a fixed pool of worker threads;
//! every pair produces exactly one outcome on a bounded outcome channel, which
//! the coordinating thread drains into the result store.

use crate::config::Settings;
use crate::discovery;
use crate::error::{IntroscanError, Result};
use crate::export;
use crate::fingerprint::{
    ChromaprintProvider, FileFingerprintSource, FingerprintProvider, FingerprintSource,
};
use crate::matching::MatchConfig;
use crate::pipeline::analyzer::analyze_pair;
use crate::pipeline::store::ResultStore;
use crate::types::{PairMatch, SearchResult, WorkPair};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A pair that did not produce a match
#[derive(Debug, Clone)]
pub struct PairFailure {
    pub pair: WorkPair,
    pub reason: String,
    /// True for the expected "no common region" outcome, false for real failures
    pub no_match: bool,
}

/// Pipeline result summary
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub total_files: usize,
    pub pairs: usize,
    /// Union-merged range per file with at least one successful pair, sorted by file
    pub found: Vec<SearchResult>,
    /// Files without any successful pair, in listing order
    pub unmatched: Vec<PathBuf>,
    pub failed_pairs: Vec<PairFailure>,
}

impl PipelineReport {
    /// Number of pairs that produced a match
    pub fn matched_pairs(&self) -> usize {
        self.pairs - self.failed_pairs.len()
    }

    /// Number of failed pairs that were errors rather than plain non-matches
    pub fn errored_pairs(&self) -> usize {
        self.failed_pairs.iter().filter(|f| !f.no_match).count()
    }
}

/// Outcome of one dispatched pair
struct PairOutcome {
    index: usize,
    pair: WorkPair,
    result: Result<PairMatch>,
}

/// Run the full pipeline: discover files, compare neighbours, report
pub fn run(settings: &Settings) -> Result<PipelineReport> {
    let pipeline_start = Instant::now();

    settings.validate()?;

    // Phase 1: Discovery
    info!("Scanning {} for .{} files...", settings.input.display(), settings.extension);
    let files = discovery::scan(&settings.input, &settings.extension, settings.recursive)?;

    // Phase 2: Comparison
    let report = compare_files(&files, file_source(settings), settings);

    // Phase 3: Export
    if let Some(json_path) = &settings.json_output {
        export::write_report(&report, settings, json_path)?;
    }

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Compare two named files directly, without scanning a directory
///
/// Unlike [`run`], per-pair failures come back as the error: a missing file is
/// `InputNotFound`, non-overlapping files are `NoMatch`.
pub fn run_pair(settings: &Settings, first: &Path, second: &Path) -> Result<PairMatch> {
    settings.validate()?;
    for path in [first, second] {
        if !path.is_file() {
            return Err(IntroscanError::InputNotFound(path.to_path_buf()));
        }
    }

    let pair = WorkPair::new(first, second);
    info!("Comparing {}", pair);
    analyze_pair(&pair, file_source(settings).as_ref(), &settings.match_config())
}

/// Chromaprint over the first window of each WAV file
fn file_source(settings: &Settings) -> Arc<dyn FingerprintSource> {
    let provider = Arc::new(ChromaprintProvider::new());
    info!("Fingerprinting with {}", provider.name());
    Arc::new(FileFingerprintSource::new(
        provider,
        settings.sample_rate,
        settings.window_secs,
    ))
}

/// Pair each file with its successor in listing order
pub fn pair_up(files: &[PathBuf]) -> Vec<WorkPair> {
    files
        .windows(2)
        .map(|w| WorkPair::new(w[0].clone(), w[1].clone()))
        .collect()
}

/// Compare every neighbouring pair of `files` on a bounded worker pool
///
/// Never fails as a whole: per-pair errors, worker panics and timeouts all end
/// up in `failed_pairs`.
pub fn compare_files(
    files: &[PathBuf],
    source: Arc<dyn FingerprintSource>,
    settings: &Settings,
) -> PipelineReport {
    let comparison_start = Instant::now();
    let pairs = pair_up(files);

    if pairs.is_empty() {
        info!("Fewer than two files, nothing to compare");
        return PipelineReport {
            total_files: files.len(),
            pairs: 0,
            found: Vec::new(),
            unmatched: files.to_vec(),
            failed_pairs: Vec::new(),
        };
    }

    let worker_count = settings.workers.max(1).min(pairs.len());
    let capacity = settings.queue_capacity.max(1);
    info!(
        "Comparing {} pairs with {} workers",
        pairs.len(),
        worker_count
    );

    // Both queues are bounded: the producer blocks while workers are busy, and
    // workers block while the coordinator is merging. The producer runs on its
    // own thread so the coordinator can drain outcomes while jobs are queued.
    let (job_tx, job_rx) = bounded::<(usize, WorkPair)>(capacity);
    let (outcome_tx, outcome_rx) = bounded::<PairOutcome>(capacity);

    let producer = {
        let jobs = pairs.clone();
        thread::spawn(move || {
            for job in jobs.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    // All workers are gone
                    break;
                }
            }
        })
    };

    let config = settings.match_config();
    let workers: Vec<JoinHandle<()>> = (0..worker_count)
        .map(|worker_id| {
            let jobs = job_rx.clone();
            let outcomes = outcome_tx.clone();
            let source = Arc::clone(&source);
            thread::spawn(move || pair_worker(worker_id, jobs, outcomes, source, config))
        })
        .collect();

    // Workers hold the only remaining handles, so the outcome channel
    // disconnects once every worker has exited
    drop(job_rx);
    drop(outcome_tx);

    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(pairs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut store = ResultStore::new();
    let mut failed_pairs = Vec::new();
    let mut reported = vec![false; pairs.len()];
    let mut stopped_early: Option<IntroscanError> = None;

    // Exactly one outcome per dispatched pair
    for _ in 0..pairs.len() {
        let received = match settings.pair_timeout {
            Some(timeout) => outcome_rx.recv_timeout(timeout),
            None => outcome_rx
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        let outcome = match received {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                warn!("No pair finished within the timeout, giving up on the remaining pairs");
                stopped_early = Some(IntroscanError::TimedOut);
                break;
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("All workers exited before every pair was reported");
                stopped_early = Some(IntroscanError::WorkerPanicked(
                    "worker pool exited early".to_string(),
                ));
                break;
            }
        };

        reported[outcome.index] = true;
        if let Some(ref pb) = progress_bar {
            pb.inc(1);
            pb.set_message(outcome.pair.to_string());
        }

        match outcome.result {
            Ok(matched) => {
                debug!(
                    "{}: {:.1}-{:.1}s / {:.1}-{:.1}s",
                    outcome.pair,
                    matched.first.start_secs,
                    matched.first.end_secs,
                    matched.second.start_secs,
                    matched.second.end_secs
                );
                store.merge(matched.first);
                store.merge(matched.second);
            }
            Err(e) => {
                if e.is_no_match() {
                    debug!("{}: {}", outcome.pair, e);
                } else {
                    warn!("Failed {}: {}", outcome.pair, e);
                }
                failed_pairs.push(PairFailure {
                    pair: outcome.pair,
                    reason: e.to_string(),
                    no_match: e.is_no_match(),
                });
            }
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Comparison complete");
    }

    match stopped_early {
        Some(reason) => {
            for (pair, _) in pairs.iter().zip(&reported).filter(|(_, done)| !**done) {
                failed_pairs.push(PairFailure {
                    pair: pair.clone(),
                    reason: reason.to_string(),
                    no_match: false,
                });
            }
            // Stuck workers are left detached; dropping the receiver makes any
            // worker that does finish exit instead of blocking on send
            drop(outcome_rx);
        }
        None => {
            drop(outcome_rx);
            join_thread("producer", producer);
            for (worker_id, handle) in workers.into_iter().enumerate() {
                join_thread(&format!("worker {}", worker_id), handle);
            }
        }
    }

    let unmatched: Vec<PathBuf> = files
        .iter()
        .filter(|f| !store.contains(f))
        .cloned()
        .collect();

    info!(
        "Compared {} pairs in {:.2}s ({} matched, {} without match)",
        pairs.len(),
        comparison_start.elapsed().as_secs_f64(),
        pairs.len() - failed_pairs.len(),
        failed_pairs.len()
    );

    PipelineReport {
        total_files: files.len(),
        pairs: pairs.len(),
        found: store.into_sorted(),
        unmatched,
        failed_pairs,
    }
}

/// Worker loop: pull pairs until the queue closes, send one outcome per pair
fn pair_worker(
    worker_id: usize,
    jobs: Receiver<(usize, WorkPair)>,
    outcomes: Sender<PairOutcome>,
    source: Arc<dyn FingerprintSource>,
    config: MatchConfig,
) {
    for (index, pair) in jobs {
        debug!("Worker {} took pair {}: {}", worker_id, index, pair);

        // A panicking fingerprint backend fails the pair, not the run
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            analyze_pair(&pair, source.as_ref(), &config)
        }))
        .unwrap_or_else(|panic_info| {
            let message = panic_message(panic_info.as_ref());
            error!("Worker {} panicked on {}: {}", worker_id, pair, message);
            Err(IntroscanError::WorkerPanicked(message))
        });

        if outcomes.send(PairOutcome { index, pair, result }).is_err() {
            // Coordinator stopped listening
            break;
        }
    }
}

fn join_thread(name: &str, handle: JoinHandle<()>) {
    match handle.join() {
        Ok(()) => debug!("{} thread completed", name),
        Err(panic_info) => {
            error!("{} thread panicked: {}", name, panic_message(panic_info.as_ref()));
        }
    }
}

/// Extract panic message if possible
fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fingerprint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn test_settings(workers: usize, queue_capacity: usize) -> Settings {
        Settings {
            workers,
            queue_capacity,
            bit_distance_threshold: 8,
            min_match_secs: 5.0,
            show_progress: false,
            ..Settings::default()
        }
    }

    /// Every lookup fails
    struct FailingSource {
        calls: AtomicUsize,
    }

    impl FingerprintSource for FailingSource {
        fn fingerprint_of(&self, path: &Path) -> Result<Fingerprint> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(IntroscanError::load_error(path, "unreadable"))
        }
    }

    struct PanickingSource;

    impl FingerprintSource for PanickingSource {
        fn fingerprint_of(&self, _path: &Path) -> Result<Fingerprint> {
            panic!("corrupt input");
        }
    }

    struct SlowSource;

    impl FingerprintSource for SlowSource {
        fn fingerprint_of(&self, _path: &Path) -> Result<Fingerprint> {
            thread::sleep(Duration::from_secs(5));
            Ok(Fingerprint::new(vec![0; 10], 10.0))
        }
    }

    struct MapSource(HashMap<PathBuf, Fingerprint>);

    impl FingerprintSource for MapSource {
        fn fingerprint_of(&self, path: &Path) -> Result<Fingerprint> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| IntroscanError::load_error(path, "missing"))
        }
    }

    fn random_codes(seed: u64, len: usize) -> Vec<u32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen()).collect()
    }

    #[test]
    fn test_pair_up() {
        let files = paths(&["a", "b", "c", "d"]);
        let pairs = pair_up(&files);
        assert_eq!(
            pairs,
            vec![
                WorkPair::new("a", "b"),
                WorkPair::new("b", "c"),
                WorkPair::new("c", "d"),
            ]
        );
        assert!(pair_up(&paths(&["a"])).is_empty());
        assert!(pair_up(&[]).is_empty());
    }

    #[test]
    fn test_single_file_is_unmatched() {
        let source = Arc::new(FailingSource {
            calls: AtomicUsize::new(0),
        });
        let report = compare_files(&paths(&["only.wav"]), source.clone(), &test_settings(2, 2));
        assert_eq!(report.pairs, 0);
        assert_eq!(report.unmatched, paths(&["only.wav"]));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_every_pair_failing_still_completes() {
        // More pairs than queue slots and workers
        let files: Vec<PathBuf> = (0..12).map(|i| PathBuf::from(format!("{:02}.wav", i))).collect();
        let source = Arc::new(FailingSource {
            calls: AtomicUsize::new(0),
        });

        let report = compare_files(&files, source, &test_settings(3, 2));

        assert_eq!(report.pairs, 11);
        assert_eq!(report.failed_pairs.len(), 11);
        assert!(report.found.is_empty());
        assert_eq!(report.unmatched, files);
        assert_eq!(report.errored_pairs(), 11);
        assert_eq!(report.matched_pairs(), 0);
    }

    #[test]
    fn test_panicking_source_fails_pairs() {
        let files = paths(&["a.wav", "b.wav", "c.wav"]);
        let report = compare_files(&files, Arc::new(PanickingSource), &test_settings(2, 1));

        assert_eq!(report.failed_pairs.len(), 2);
        assert!(report
            .failed_pairs
            .iter()
            .all(|f| f.reason.contains("corrupt input")));
        assert_eq!(report.unmatched.len(), 3);
    }

    #[test]
    fn test_timeout_reports_outstanding_pairs() {
        let files = paths(&["a.wav", "b.wav", "c.wav"]);
        let settings = Settings {
            pair_timeout: Some(Duration::from_millis(50)),
            ..test_settings(1, 1)
        };
        let report = compare_files(&files, Arc::new(SlowSource), &settings);

        assert_eq!(report.failed_pairs.len(), 2);
        assert!(report.failed_pairs.iter().all(|f| !f.no_match));
        assert_eq!(report.unmatched.len(), 3);
    }

    #[test]
    fn test_results_merged_per_file() {
        // a, b and c open with the same intro, d is unrelated
        let intro = Fingerprint::new(random_codes(1000, 40), 40.0);
        let source = Arc::new(MapSource(HashMap::from([
            (PathBuf::from("a.wav"), intro.clone()),
            (PathBuf::from("b.wav"), intro.clone()),
            (PathBuf::from("c.wav"), intro),
            (PathBuf::from("d.wav"), Fingerprint::new(random_codes(5000, 40), 40.0)),
        ])));

        let files = paths(&["a.wav", "b.wav", "c.wav", "d.wav"]);
        // Size 1 degenerates to sequential execution
        for workers in [1, 4] {
            let report = compare_files(&files, source.clone(), &test_settings(workers, 2));

            assert_eq!(report.pairs, 3);
            assert_eq!(report.matched_pairs(), 2);
            let found: Vec<_> = report.found.iter().map(|r| r.file.clone()).collect();
            assert_eq!(found, paths(&["a.wav", "b.wav", "c.wav"]));
            assert_eq!(report.unmatched, paths(&["d.wav"]));
            assert_eq!(report.failed_pairs[0].pair, WorkPair::new("c.wav", "d.wav"));
            assert!(report.failed_pairs[0].no_match);

            let b_range = &report.found[1];
            assert_eq!(b_range.start_secs, 0.0);
            assert!((b_range.end_secs - 36.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_overlap_between_three_files() {
        let source = MapSource(HashMap::from([
            (PathBuf::from("a.wav"), Fingerprint::new(random_codes(1, 60), 60.0)),
            (PathBuf::from("b.wav"), Fingerprint::new(random_codes(700, 60), 60.0)),
            (PathBuf::from("c.wav"), Fingerprint::new(random_codes(90_000, 60), 60.0)),
        ]));
        let files = paths(&["a.wav", "b.wav", "c.wav"]);
        let report = compare_files(&files, Arc::new(source), &test_settings(5, 30));

        assert!(report.found.is_empty());
        assert_eq!(report.unmatched, files);
        assert!(report.failed_pairs.iter().all(|f| f.no_match));
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
