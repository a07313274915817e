//! Run audit log and end-of-run reporting.
//!
//! A [`RunLog`] is the explicit context for one sorting run: every component
//! appends its events here instead of mutating shared state, and the known /
//! unknown extension sets accumulate alongside. The log is held in memory for
//! the whole run and flushed to `log.txt` exactly once at the end.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::category::Category;

/// Name of the audit log written into the sorted root.
pub const LOG_FILE_NAME: &str = "log.txt";

/// Append-only audit log plus extension bookkeeping for a single run.
///
/// Entries are free-form, human-readable lines tagged with a `DIR:`,
/// `NORMALIZE:`, `SORT:` or `LOG:` prefix. The extension sets are
/// deduplicated by construction and iterate in a stable order.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<String>,
    known_extensions: BTreeSet<String>,
    unknown_extensions: BTreeSet<String>,
}

impl RunLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a run against `root`.
    pub fn run_started(&mut self, root: &Path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        self.entries.push(format!("LOG: run started at {timestamp}"));
        self.entries
            .push(format!("LOG: started sorting folder {}", root.display()));
    }

    /// Records creation of a category directory.
    pub fn dir_created(&mut self, path: &Path) {
        self.entries
            .push(format!("DIR: {} was created", path.display()));
    }

    /// Records a normalization rename.
    pub fn file_renamed(&mut self, old_name: &str, new_name: &str) {
        self.entries
            .push(format!("NORMALIZE: File renamed {old_name} -> {new_name}"));
    }

    /// Records a relocation. Logged for every move, including overwrites.
    pub fn file_moved(&mut self, from: &Path, to: &Path) {
        self.entries.push(format!(
            "SORT: File moved {} -> {}",
            from.display(),
            to.display()
        ));
    }

    /// Records a successful archive expansion.
    pub fn archive_unpacked(&mut self, archive: &Path, destination: &Path) {
        self.entries.push(format!(
            "SORT: Archive unpacked {} -> {}",
            archive.display(),
            destination.display()
        ));
    }

    /// Records a failed archive expansion with its cause. Never fatal.
    pub fn unpack_failed(&mut self, archive: &Path, reason: &str) {
        self.entries.push(format!(
            "SORT: Error unpacking Archive {}: {reason}",
            archive.display()
        ));
    }

    /// Records removal of an empty directory.
    pub fn dir_removed(&mut self, path: &Path) {
        self.entries
            .push(format!("DIR: Empty Directory {} was removed", path.display()));
    }

    /// Files an extension under the known or unknown set.
    pub fn record_extension(&mut self, extension: &str, known: bool) {
        let set = if known {
            &mut self.known_extensions
        } else {
            &mut self.unknown_extensions
        };
        set.insert(extension.to_string());
    }

    /// Extensions that matched a category during this run.
    pub fn known_extensions(&self) -> &BTreeSet<String> {
        &self.known_extensions
    }

    /// Extensions that fell through to `other` during this run.
    pub fn unknown_extensions(&self) -> &BTreeSet<String> {
        &self.unknown_extensions
    }

    /// All entries appended so far, in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Appends the end-of-run summary: extension sets and per-category counts.
    pub fn append_summary(&mut self, counts: &[(Category, usize)]) {
        self.entries.push(
            "------------------------- Sorting results -------------------------".to_string(),
        );
        self.entries
            .push(format!("Known extensions: {}", join(&self.known_extensions)));
        self.entries.push(format!(
            "Unknown extensions: {}",
            join(&self.unknown_extensions)
        ));
        for (category, count) in counts {
            self.entries
                .push(format!("Files in the {}: {count}", category.dir_name()));
        }
    }

    /// Writes the log to `root/log.txt`, one entry per line, replacing any
    /// previous log file.
    pub fn save(&self, root: &Path) -> io::Result<PathBuf> {
        let log_path = root.join(LOG_FILE_NAME);
        let mut contents = self.entries.join("\n");
        contents.push('\n');
        fs::write(&log_path, contents)?;
        Ok(log_path)
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Counts files currently present under each category directory of `root`,
/// recursively. A category whose directory does not exist counts zero.
pub fn count_category_files(root: &Path) -> Vec<(Category, usize)> {
    Category::ALL
        .iter()
        .map(|category| {
            let dir = root.join(category.dir_name());
            let count = if dir.is_dir() {
                WalkDir::new(&dir)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file())
                    .count()
            } else {
                0
            };
            (*category, count)
        })
        .collect()
}
