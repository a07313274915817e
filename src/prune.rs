//! Empty-directory removal after sorting.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::mover::{SortError, SortResult};
use crate::report::RunLog;

/// Removes every directory under `root` that is empty once its descendants
/// have been handled. The root itself is never removed.
///
/// The walk is contents-first, so a directory is only considered after all of
/// its children; a grandparent emptied by two levels of removals below it is
/// still caught in this single pass. Each removal is logged.
///
/// # Errors
///
/// Walk and removal failures are fatal, like every other filesystem failure
/// during a run.
pub fn prune_empty_dirs(root: &Path, log: &mut RunLog) -> SortResult<()> {
    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(|e| SortError::WalkFailed {
            path: root.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_dir() || entry.path() == root {
            continue;
        }
        if is_empty(entry.path())? {
            fs::remove_dir(entry.path()).map_err(|e| SortError::DirectoryRemovalFailed {
                path: entry.path().to_path_buf(),
                source: e,
            })?;
            log.dir_removed(entry.path());
        }
    }
    Ok(())
}

fn is_empty(dir: &Path) -> SortResult<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| SortError::WalkFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(entries.next().is_none())
}
