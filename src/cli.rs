//! Command-line interface.
//!
//! Argument parsing, precondition checks on the target directory, and the
//! exit-code mapping. The sorting core itself never exits or prints; this
//! layer turns a [`RunOutcome`] into operator-facing output.

use clap::Parser;
use std::path::PathBuf;

use crate::config::SkipConfig;
use crate::output::OutputFormatter;
use crate::report::LOG_FILE_NAME;
use crate::sorter::run_sort_with_skips;

/// Sort a cluttered directory into category folders.
#[derive(Debug, Parser)]
#[command(name = "sweepdir", version, about)]
pub struct Cli {
    /// Directory to sort.
    pub directory: PathBuf,

    /// Path to a skip-rules configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Exit codes:
/// 0 sorted and log written, 1 run or log failure, 2 directory missing,
/// 3 not a directory, 4 bad configuration.
pub fn run_cli(cli: &Cli) -> i32 {
    let root = &cli.directory;

    if !root.exists() {
        OutputFormatter::error(&format!(
            "Specified folder {} does not exist",
            root.display()
        ));
        return 2;
    }
    if !root.is_dir() {
        OutputFormatter::error(&format!("{} is not a directory", root.display()));
        return 3;
    }

    let skips = match SkipConfig::load(cli.config.as_deref()).and_then(SkipConfig::compile) {
        Ok(skips) => skips,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            return 4;
        }
    };

    OutputFormatter::info(&format!("Sorting contents of: {}", root.display()));

    match run_sort_with_skips(root, &skips) {
        Ok(outcome) => {
            OutputFormatter::summary_table(&outcome.counts);
            OutputFormatter::extension_line("Known extensions", &outcome.known_extensions);
            OutputFormatter::extension_line("Unknown extensions", &outcome.unknown_extensions);
            if outcome.success {
                OutputFormatter::success(&format!(
                    "Sorting done. Log saved to {}",
                    root.join(LOG_FILE_NAME).display()
                ));
                0
            } else {
                OutputFormatter::warning(
                    "Sorting finished, but the log file could not be written.",
                );
                1
            }
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            1
        }
    }
}
