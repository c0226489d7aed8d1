//! introscan CLI entry point

use clap::Parser;
use introscan::config::{Cli, Settings};
use introscan::export;
use introscan::pipeline;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    if let Err(e) = settings.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Search range: 0..{} seconds", settings.window_secs);

    let start = Instant::now();
    match cli.pair.as_deref() {
        Some([first, second]) => compare_pair(&settings, first, second, start),
        _ => compare_directory(&settings, start),
    }
}

fn compare_directory(settings: &Settings, start: Instant) -> ExitCode {
    match pipeline::run(settings) {
        Ok(report) => {
            println!();
            print!("{}", export::format_report(&report, settings.window_secs));
            println!();
            print!("{}", export::format_summary(&report, start.elapsed()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn compare_pair(settings: &Settings, first: &Path, second: &Path, start: Instant) -> ExitCode {
    let code = match pipeline::run_pair(settings, first, second) {
        Ok(matched) => {
            println!();
            print!("{}", export::format_pair_match(&matched));
            ExitCode::SUCCESS
        }
        Err(e) if e.is_no_match() => {
            println!();
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };
    print!("{}", export::format_elapsed(start.elapsed()));
    code
}

fn init_logging(cli: &Cli) {
    let filter = cli.log_level().to_string().to_lowercase();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
