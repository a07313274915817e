//! The sorting run: walk, classify, move, expand, prune, report, persist.
//!
//! Stages run strictly in sequence and each one operates on the tree as the
//! previous stage left it. Every mutating pass materializes its file list
//! before touching the tree, so relocations never perturb an in-progress
//! walk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::category::{Category, CategoryMap};
use crate::config::CompiledSkips;
use crate::mover::{FileMover, SortError, SortResult};
use crate::normalize::{normalize, split_name};
use crate::prune::prune_empty_dirs;
use crate::report::{RunLog, count_category_files};
use crate::unpack::unpack_archive;

/// A concrete file discovered during the walk. Exists only as a walk
/// artifact; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path at discovery time.
    pub path: PathBuf,
    /// Base name.
    pub name: String,
    /// Extension, lower-cased, with the leading dot; empty when the file has
    /// none (dotfiles count as having none).
    pub extension: String,
}

/// What a completed run reports back to its caller.
#[derive(Debug)]
pub struct RunOutcome {
    /// Whether the audit log was persisted. The sorting itself either
    /// completed or the run returned an error instead.
    pub success: bool,
    /// Files present per category after the run, in category order.
    pub counts: Vec<(Category, usize)>,
    /// Extensions seen that matched a category.
    pub known_extensions: Vec<String>,
    /// Extensions seen that fell through to `other`.
    pub unknown_extensions: Vec<String>,
}

/// Sorts `root` with the default skip rules.
///
/// See [`run_sort_with_skips`].
pub fn run_sort(root: &Path) -> SortResult<RunOutcome> {
    run_sort_with_skips(root, &CompiledSkips::default())
}

/// Runs the full sorting pipeline against `root`.
///
/// Stages, in order, none skipped once the run starts:
///
/// 1. **Walk & sort** — every file in the tree is classified by extension and
///    moved under `root/<category>/` with a normalized name.
/// 2. **Expand archives** — every file under `root/archives` is offered to
///    the archive expander; failures are logged and skipped, never fatal.
/// 3. **Prune** — directories left empty by the moves are removed bottom-up.
/// 4. **Report** — per-category counts and the known/unknown extension sets
///    are appended to the log.
/// 5. **Persist** — the log is written once to `root/log.txt`.
///
/// # Errors
///
/// Returns [`SortError`] for filesystem failures during the walk, a move,
/// directory creation or pruning; the tree may be partially sorted and is
/// not rolled back. A failure to write the log is NOT an error: it is
/// reported through [`RunOutcome::success`].
pub fn run_sort_with_skips(root: &Path, skips: &CompiledSkips) -> SortResult<RunOutcome> {
    if !root.is_dir() {
        return Err(SortError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let mut log = RunLog::new();
    log.run_started(root);

    // Stage 1: walk & sort.
    let map = CategoryMap::new();
    for entry in collect_files(root, skips)? {
        let category = map.category_of(&entry.extension);
        if !entry.extension.is_empty() {
            log.record_extension(&entry.extension, category != Category::Other);
        }
        FileMover::move_to_category(root, &entry.path, category, &mut log)?;
    }

    // Stage 2: expand archives.
    expand_archives(root, &mut log)?;

    // Stage 3: prune emptied directories.
    prune_empty_dirs(root, &mut log)?;

    // Stage 4: report.
    let counts = count_category_files(root);
    log.append_summary(&counts);

    let known_extensions = log.known_extensions().iter().cloned().collect();
    let unknown_extensions = log.unknown_extensions().iter().cloned().collect();

    // Stage 5: persist. The sort already happened; a write failure only
    // flips the outcome flag.
    let success = log.save(root).is_ok();

    Ok(RunOutcome {
        success,
        counts,
        known_extensions,
        unknown_extensions,
    })
}

/// Materializes the list of files to sort before any of them move.
fn collect_files(root: &Path, skips: &CompiledSkips) -> SortResult<Vec<FileEntry>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| SortError::WalkFailed {
            path: root.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() || skips.should_skip(entry.path()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let extension = extension_of(&name);
        files.push(FileEntry {
            path: entry.into_path(),
            name,
            extension,
        });
    }
    Ok(files)
}

/// Offers every file already relocated into `archives` to the expander.
///
/// Each archive expands into a sibling directory named after its normalized
/// stem. The list of candidates is materialized first so freshly extracted
/// files are not themselves offered for expansion. A failed expansion is
/// logged with its reason and the run continues; the archive stays in place.
fn expand_archives(root: &Path, log: &mut RunLog) -> SortResult<()> {
    let archives_dir = root.join(Category::Archives.dir_name());
    if !archives_dir.is_dir() {
        return Ok(());
    }

    let mut archives = Vec::new();
    for entry in WalkDir::new(&archives_dir) {
        let entry = entry.map_err(|e| SortError::WalkFailed {
            path: archives_dir.clone(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            archives.push(entry.into_path());
        }
    }

    for archive in archives {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (stem, _) = split_name(&name);
        let destination = archives_dir.join(normalize(stem));
        match unpack_archive(&archive, &destination) {
            Ok(()) => log.archive_unpacked(&archive, &destination),
            Err(e) => log.unpack_failed(&archive, &e.to_string()),
        }
    }
    Ok(())
}

/// Suffix-style extension: lower-cased, dotted, empty for extensionless
/// names, dotfiles and names ending in a dot.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}
