//! Console output helpers.
//!
//! All operator-facing messages go through here so styling stays consistent.
//! The audit log written to `log.txt` is separate and unstyled; this module
//! only covers what the terminal shows during a run.

use colored::*;

use crate::category::Category;

/// Styled console output for the CLI.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Green checkmark line.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Red cross line, on stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Yellow warning line.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Cyan informational line.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Bold section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the per-category file counts in category order.
    pub fn summary_table(counts: &[(Category, usize)]) {
        Self::header("SORTING RESULTS");

        let width = counts
            .iter()
            .map(|(category, _)| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        let mut total = 0;
        for (category, count) in counts {
            total += count;
            println!(
                "{:<width$} | {}",
                category.dir_name(),
                count.to_string().green(),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {}",
            "Total".bold(),
            total.to_string().green().bold(),
            width = width
        );
    }

    /// Prints one comma-joined extension set with a label.
    pub fn extension_line(label: &str, extensions: &[String]) {
        if extensions.is_empty() {
            println!("{}: {}", label.bold(), "none".dimmed());
        } else {
            println!("{}: {}", label.bold(), extensions.join(", "));
        }
    }
}
