//! JSON export for interoperability with other tools

use crate::config::Settings;
use crate::error::{IntroscanError, Result};
use crate::pipeline::PipelineReport;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level JSON output structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportJson {
    /// Schema version for forward compatibility
    pub version: String,
    /// Run metadata
    pub metadata: ExportMetadata,
    /// Files with a common region
    pub found: Vec<RegionJson>,
    /// Files without any common region
    pub unmatched: Vec<String>,
    /// Pairs that produced no match, and why
    pub failed_pairs: Vec<FailedPairJson>,
}

/// Export metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// introscan version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
    /// Seconds fingerprinted from the start of each file
    pub window_secs: u32,
    pub bit_distance_threshold: u32,
    pub min_match_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionJson {
    pub file: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedPairJson {
    pub first: String,
    pub second: String,
    pub reason: String,
    pub no_match: bool,
}

/// Build the JSON document for a report
pub fn report_to_json(report: &PipelineReport, settings: &Settings) -> ReportJson {
    ReportJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ExportMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            window_secs: settings.window_secs,
            bit_distance_threshold: settings.bit_distance_threshold,
            min_match_secs: settings.min_match_secs,
        },
        found: report
            .found
            .iter()
            .map(|r| RegionJson {
                file: r.file.to_string_lossy().to_string(),
                start_secs: r.start_secs,
                end_secs: r.end_secs,
            })
            .collect(),
        unmatched: report
            .unmatched
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect(),
        failed_pairs: report
            .failed_pairs
            .iter()
            .map(|f| FailedPairJson {
                first: f.pair.first.to_string_lossy().to_string(),
                second: f.pair.second.to_string_lossy().to_string(),
                reason: f.reason.clone(),
                no_match: f.no_match,
            })
            .collect(),
    }
}

/// Write the report to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// This prevents data corruption if the write is interrupted.
pub fn write_report(report: &PipelineReport, settings: &Settings, output_path: &Path) -> Result<()> {
    // Write to temp file in same directory (ensures same filesystem for atomic rename)
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| IntroscanError::output_error(output_path, e))?;
    let writer = BufWriter::new(file);

    let output = report_to_json(report, settings);

    serde_json::to_writer_pretty(writer, &output).map_err(|e| {
        // Clean up temp file on error
        let _ = std::fs::remove_file(&temp_path);
        IntroscanError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    // Atomic rename: either succeeds completely or fails without modifying target
    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        IntroscanError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!(
        "Wrote report for {} files to {}",
        report.total_files,
        output_path.display()
    );

    Ok(())
}
