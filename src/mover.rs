/// Collision-overwriting file relocation into category directories.
///
/// This module moves files into their category subdirectory under the sorted
/// root, creating the directory on first use and normalizing the filename on
/// the way. It also defines the fatal error type shared by every stage that
/// touches the filesystem.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::normalize::normalize;
use crate::report::RunLog;

/// Errors that abort a sorting run.
///
/// Filesystem failures are not recovered locally: the tree may already be
/// half-sorted and no rollback is attempted, so they propagate to the caller.
#[derive(Debug)]
pub enum SortError {
    /// The sorted root does not exist or is not a directory.
    InvalidRoot { path: PathBuf },
    /// Failed to create a category directory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// Failed to relocate a file into its category directory.
    FileMoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    /// Failed to remove an emptied directory.
    DirectoryRemovalFailed { path: PathBuf, source: io::Error },
    /// The directory walk itself failed.
    WalkFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path } => {
                write!(f, "Invalid root directory {}", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            Self::DirectoryRemovalFailed { path, source } => {
                write!(
                    f,
                    "Failed to remove directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::WalkFailed { path, source } => {
                write!(f, "Failed to walk {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRoot { .. } => None,
            Self::DirectoryCreationFailed { source, .. }
            | Self::FileMoveFailed { source, .. }
            | Self::DirectoryRemovalFailed { source, .. }
            | Self::WalkFailed { source, .. } => Some(source),
        }
    }
}

/// Result type for sorting-run operations.
pub type SortResult<T> = Result<T, SortError>;

/// What a single move did.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Where the file now lives.
    pub new_path: PathBuf,
    /// Whether normalization changed the filename.
    pub renamed: bool,
}

/// Moves files into category subdirectories.
pub struct FileMover;

impl FileMover {
    /// Relocates `file` into `root/<category>` under its normalized name.
    ///
    /// The category directory is created (one level) on first use and the
    /// creation logged. If normalization changes the name, a rename event is
    /// logged; the move happens either way. A pre-existing file at the
    /// destination is silently overwritten — last write wins, no
    /// collision-avoidance suffixing. The move event is logged on every
    /// relocation.
    ///
    /// # Errors
    ///
    /// Any directory-creation or relocation failure is fatal and returned as
    /// a [`SortError`].
    pub fn move_to_category(
        root: &Path,
        file: &Path,
        category: Category,
        log: &mut RunLog,
    ) -> SortResult<MoveOutcome> {
        let target_dir = root.join(category.dir_name());
        if !target_dir.exists() {
            fs::create_dir(&target_dir).map_err(|e| SortError::DirectoryCreationFailed {
                path: target_dir.clone(),
                source: e,
            })?;
            log.dir_created(&target_dir);
        }

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| SortError::FileMoveFailed {
                from: file.to_path_buf(),
                to: target_dir.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
            })?;

        let new_name = normalize(&name);
        let renamed = new_name != name;
        if renamed {
            log.file_renamed(&name, &new_name);
        }

        let destination = target_dir.join(&new_name);

        // Overwrite-on-collision, Path::replace style: clear the destination
        // first so the rename also succeeds on platforms where rename does
        // not replace. A move onto itself (re-run on a sorted tree) must not
        // delete the file it is about to move.
        if destination.exists() && destination != file {
            fs::remove_file(&destination).map_err(|e| SortError::FileMoveFailed {
                from: file.to_path_buf(),
                to: destination.clone(),
                source: e,
            })?;
        }
        fs::rename(file, &destination).map_err(|e| SortError::FileMoveFailed {
            from: file.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        log.file_moved(file, &destination);

        Ok(MoveOutcome {
            new_path: destination,
            renamed,
        })
    }
}
