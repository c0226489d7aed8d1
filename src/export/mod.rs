//! Report output: console summary and JSON

pub mod console;
pub mod json;

pub use console::{format_elapsed, format_pair_match, format_report, format_summary, ConsoleReport};
pub use json::write_report;
