//! Human-readable report

use crate::pipeline::PipelineReport;
use crate::types::{display_name, PairMatch, SearchResult};
use std::fmt;
use std::time::Duration;

/// Directory-mode report, rendered through `Display`
pub struct ConsoleReport<'a> {
    pub report: &'a PipelineReport,
    pub window_secs: u32,
}

impl fmt::Display for ConsoleReport<'_> {
    /// Matched files first, with their range to one decimal place, then every
    /// file that never matched its neighbours
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found common regions in:")?;
        for result in &self.report.found {
            write_range(f, result)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "No significant results found in range: 0..{} in:",
            self.window_secs
        )?;
        for file in &self.report.unmatched {
            writeln!(f, "{}", display_name(file))?;
        }
        Ok(())
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, result: &SearchResult) -> fmt::Result {
    writeln!(
        f,
        "{} intro starts at: {:.1} ends at: {:.1}",
        display_name(&result.file),
        result.start_secs,
        result.end_secs
    )
}

/// Render the end-of-run summary
pub fn format_report(report: &PipelineReport, window_secs: u32) -> String {
    ConsoleReport {
        report,
        window_secs,
    }
    .to_string()
}

/// Counts and total wall time of a directory run
pub fn format_summary(report: &PipelineReport, elapsed: Duration) -> String {
    let mut out = format!(
        "Summary: {} of {} pairs matched, {} files with a common region, {} without (of {} total)\n",
        report.matched_pairs(),
        report.pairs,
        report.found.len(),
        report.unmatched.len(),
        report.total_files
    );
    if report.errored_pairs() > 0 {
        out.push_str(&format!(
            "{} pairs failed to load or fingerprint; rerun with -v for details\n",
            report.errored_pairs()
        ));
    }
    out.push_str(&format_elapsed(elapsed));
    out
}

/// Both ranges of a directly compared pair, plus the alignment
pub fn format_pair_match(matched: &PairMatch) -> String {
    let range = |r: &SearchResult| {
        format!(
            "{} intro starts at: {:.1} ends at: {:.1}\n",
            display_name(&r.file),
            r.start_secs,
            r.end_secs
        )
    };
    format!(
        "{}{}Offset: {} codes, score: {:.3}\n",
        range(&matched.first),
        range(&matched.second),
        matched.offset,
        matched.score
    )
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Finished in: {:.2}s\n", elapsed.as_secs_f64())
}
