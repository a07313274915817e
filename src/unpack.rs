//! Archive expansion.
//!
//! One entry point, [`unpack_archive`], dispatching to a per-format routine
//! on the file extension: `.zip` via the zip crate, `.tar` via tar, and `.gz`
//! read as a gzipped tarball. A bare gzip file (not a tar inside) therefore
//! fails as malformed, which callers report and move past — expansion is
//! best-effort by contract and never aborts a run.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use flate2::read::GzDecoder;

/// Why an archive could not be expanded.
#[derive(Debug)]
pub enum UnpackError {
    /// The file extension names no supported archive format.
    UnsupportedFormat { extension: String },
    /// The archive could not be read as its claimed format.
    Malformed { reason: String },
    /// Plain I/O failure opening the archive or writing its contents.
    Io { source: io::Error },
}

impl std::fmt::Display for UnpackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat { extension } if extension.is_empty() => {
                write!(f, "unsupported archive format (no extension)")
            }
            Self::UnsupportedFormat { extension } => {
                write!(f, "unsupported archive format .{extension}")
            }
            Self::Malformed { reason } => write!(f, "malformed archive: {reason}"),
            Self::Io { source } => write!(f, "io error: {source}"),
        }
    }
}

impl std::error::Error for UnpackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for UnpackError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

/// Expands the archive at `archive` into the directory `destination`.
///
/// The destination directory may already exist by the time extraction
/// fails, so a bad archive can leave an empty directory behind; the pruning
/// pass cleans those up. The archive file itself is never deleted or
/// modified.
///
/// # Errors
///
/// [`UnpackError::UnsupportedFormat`] when the extension is not `.zip`,
/// `.tar` or `.gz`; [`UnpackError::Malformed`] when the bytes do not parse
/// as the claimed format; [`UnpackError::Io`] otherwise.
pub fn unpack_archive(archive: &Path, destination: &Path) -> Result<(), UnpackError> {
    let extension = archive
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "zip" => unpack_zip(archive, destination),
        "tar" => {
            let file = File::open(archive)?;
            unpack_tar(file, destination)
        }
        // shutil-compatible: .gz means gzipped tar.
        "gz" => {
            let file = File::open(archive)?;
            unpack_tar(GzDecoder::new(file), destination)
        }
        _ => Err(UnpackError::UnsupportedFormat { extension }),
    }
}

fn unpack_zip(archive: &Path, destination: &Path) -> Result<(), UnpackError> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| UnpackError::Malformed {
        reason: e.to_string(),
    })?;
    fs::create_dir_all(destination)?;
    // ZipArchive::extract sanitizes entry paths, so entries cannot escape
    // the destination directory.
    zip.extract(destination).map_err(|e| UnpackError::Malformed {
        reason: e.to_string(),
    })?;
    Ok(())
}

fn unpack_tar<R: Read>(reader: R, destination: &Path) -> Result<(), UnpackError> {
    fs::create_dir_all(destination)?;
    let mut tar = tar::Archive::new(reader);
    tar.unpack(destination).map_err(|e| UnpackError::Malformed {
        reason: e.to_string(),
    })?;
    Ok(())
}
