/// Integration tests for sweepdir
///
/// These simulate full sorting runs against real temporary trees, end to end:
///
/// 1. Classification, normalization and the final tree layout
/// 2. Archive expansion, including corrupt archives
/// 3. Empty-directory pruning
/// 4. The audit log's contents
/// 5. Collision overwrites and re-run behavior
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use sweepdir::report::LOG_FILE_NAME;
use sweepdir::sorter::run_sort;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary directory with helpers for building input trees and asserting
/// on the sorted result.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (relative path, parents created as needed).
    fn create_file(&self, rel_path: &str, content: &[u8]) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Create a zip archive with the given entries.
    fn create_zip(&self, rel_path: &str, entries: &[(&str, &str)]) {
        let file = File::create(self.path().join(rel_path)).expect("Failed to create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, contents) in entries {
            writer.start_file(*name, options).expect("start_file failed");
            writer
                .write_all(contents.as_bytes())
                .expect("write entry failed");
        }
        writer.finish().expect("finish failed");
    }

    /// Create a gzipped tar archive with one entry.
    fn create_tar_gz(&self, rel_path: &str, entry_name: &str, content: &[u8]) {
        let file = File::create(self.path().join(rel_path)).expect("Failed to create tar.gz");
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, entry_name, content)
            .expect("append failed");
        builder
            .into_inner()
            .expect("tar finish failed")
            .finish()
            .expect("gzip finish failed");
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Should not exist: {}", path.display());
    }

    fn read_log(&self) -> String {
        fs::read_to_string(self.path().join(LOG_FILE_NAME)).expect("Failed to read log")
    }
}

// ============================================================================
// Classification and layout
// ============================================================================

#[test]
fn sorts_mixed_folder_into_categories() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.jpg", b"img");
    fixture.create_file("фото.png", b"img");
    fixture.create_file("report.PDF", b"doc");
    fixture.create_zip("archive.zip", &[("inside.txt", "hello")]);

    let outcome = run_sort(fixture.path()).expect("run failed");
    assert!(outcome.success);

    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists("images/foto.png");
    fixture.assert_file_exists("documents/report.PDF");
    fixture.assert_file_exists("archives/archive.zip");
    fixture.assert_file_exists("archives/archive/inside.txt");

    let log = fixture.read_log();
    assert!(log.contains("Files in the images: 2"));
    assert!(log.contains("Files in the documents: 1"));
    // Counts are recursive and taken after expansion: the archive itself
    // plus the file extracted from it.
    assert!(log.contains("Files in the archives: 2"));
}

#[test]
fn files_in_nested_directories_are_lifted_to_category_level() {
    let fixture = TestFixture::new();
    fixture.create_file("a/b/c/song.mp3", b"audio");
    fixture.create_file("a/movie.mkv", b"video");

    run_sort(fixture.path()).expect("run failed");

    fixture.assert_file_exists("audio/song.mp3");
    fixture.assert_file_exists("video/movie.mkv");
    // The emptied nesting is pruned.
    fixture.assert_not_exists("a");
}

#[test]
fn unknown_extensions_land_in_other() {
    let fixture = TestFixture::new();
    fixture.create_file("data.xyz", b"?");
    fixture.create_file("no_extension", b"?");

    let outcome = run_sort(fixture.path()).expect("run failed");

    fixture.assert_file_exists("other/data.xyz");
    fixture.assert_file_exists("other/no_extension");
    assert_eq!(outcome.unknown_extensions, vec![".xyz".to_string()]);

    let log = fixture.read_log();
    assert!(log.contains("Unknown extensions: .xyz"));
    assert!(log.contains("Files in the other: 2"));
}

#[test]
fn extension_sets_cover_everything_seen_and_stay_disjoint() {
    let fixture = TestFixture::new();
    fixture.create_file("a.jpg", b"x");
    fixture.create_file("b.JPG", b"x");
    fixture.create_file("c.mp3", b"x");
    fixture.create_file("d.weird", b"x");

    let outcome = run_sort(fixture.path()).expect("run failed");

    assert_eq!(
        outcome.known_extensions,
        vec![".jpg".to_string(), ".mp3".to_string()]
    );
    assert_eq!(outcome.unknown_extensions, vec![".weird".to_string()]);
    for ext in &outcome.known_extensions {
        assert!(!outcome.unknown_extensions.contains(ext));
    }
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn cyrillic_names_are_transliterated_on_move() {
    let fixture = TestFixture::new();
    fixture.create_file("Привет мир.txt", b"doc");

    run_sort(fixture.path()).expect("run failed");

    fixture.assert_file_exists("documents/Privet_mir.txt");
    let log = fixture.read_log();
    assert!(log.contains("NORMALIZE: File renamed Привет мир.txt -> Privet_mir.txt"));
}

#[test]
fn second_move_overwrites_first() {
    // Two distinct sources normalizing to one target name: last write wins,
    // exactly one file survives. Expected behavior, not a defect.
    let fixture = TestFixture::new();
    fixture.create_file("a b.txt", b"first");
    fixture.create_file("a?b.txt", b"second");

    run_sort(fixture.path()).expect("run failed");

    let documents: Vec<_> = fs::read_dir(fixture.path().join("documents"))
        .expect("Failed to read documents")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(documents.len(), 1);
    fixture.assert_file_exists("documents/a_b.txt");

    let content =
        fs::read_to_string(fixture.path().join("documents/a_b.txt")).expect("read failed");
    assert!(content == "first" || content == "second");

    let log = fixture.read_log();
    assert!(log.contains("Files in the documents: 1"));
}

// ============================================================================
// Archive expansion
// ============================================================================

#[test]
fn tar_gz_expands_into_normalized_stem_directory() {
    let fixture = TestFixture::new();
    fixture.create_tar_gz("bundle.tar.gz", "inner.txt", b"packed");

    run_sort(fixture.path()).expect("run failed");

    fixture.assert_file_exists("archives/bundle.tar.gz");
    // Stem of "bundle.tar.gz" is "bundle.tar".
    fixture.assert_file_exists("archives/bundle.tar/inner.txt");

    let log = fixture.read_log();
    assert!(log.contains("SORT: Archive unpacked"));
}

#[test]
fn corrupt_archive_is_logged_and_run_completes() {
    let fixture = TestFixture::new();
    fixture.create_file("broken.zip", b"this is not a zip file");
    fixture.create_file("fine.txt", b"doc");

    let outcome = run_sort(fixture.path()).expect("run failed");
    assert!(outcome.success);

    // The bad archive stays in place, untouched.
    fixture.assert_file_exists("archives/broken.zip");
    fixture.assert_file_exists("documents/fine.txt");

    let log = fixture.read_log();
    assert!(log.contains("SORT: Error unpacking Archive"));
    assert!(log.contains("Files in the documents: 1"));
    // The failed attempt's empty destination directory was pruned.
    fixture.assert_not_exists("archives/broken");
}

// ============================================================================
// Pruning and the log file
// ============================================================================

#[test]
fn no_empty_directories_remain_after_a_run() {
    let fixture = TestFixture::new();
    fixture.create_file("deep/er/still/track.ogg", b"audio");
    fs::create_dir_all(fixture.path().join("was/always/empty")).expect("Failed to create dirs");

    run_sort(fixture.path()).expect("run failed");

    fixture.assert_not_exists("deep");
    fixture.assert_not_exists("was");
    for entry in walkdir::WalkDir::new(fixture.path()) {
        let entry = entry.expect("walk failed");
        if entry.file_type().is_dir() && entry.path() != fixture.path() {
            assert!(
                fs::read_dir(entry.path()).expect("read_dir failed").count() > 0,
                "Empty directory left behind: {}",
                entry.path().display()
            );
        }
    }
}

#[test]
fn log_records_every_action_with_prefixes() {
    let fixture = TestFixture::new();
    fixture.create_file("sub/дом.gif", b"img");

    run_sort(fixture.path()).expect("run failed");

    let log = fixture.read_log();
    assert!(log.contains(&format!(
        "LOG: started sorting folder {}",
        fixture.path().display()
    )));
    assert!(log.contains("DIR:"));
    assert!(log.contains("NORMALIZE: File renamed дом.gif -> dom.gif"));
    assert!(log.contains("SORT: File moved"));
    assert!(log.contains("DIR: Empty Directory"));
    assert!(log.contains("Sorting results"));
}

#[test]
fn rerun_is_stable_and_overwrites_previous_log() {
    let fixture = TestFixture::new();
    fixture.create_file("clip.mp4", b"video");
    fixture.create_file("песня.mp3", b"audio");

    let first = run_sort(fixture.path()).expect("first run failed");
    let second = run_sort(fixture.path()).expect("second run failed");

    // Same tree both times; the old log is skipped, not sorted.
    fixture.assert_file_exists("video/clip.mp4");
    fixture.assert_file_exists("audio/pesnya.mp3");
    fixture.assert_not_exists("documents");
    assert_eq!(first.counts, second.counts);

    // One log file, freshly written.
    let log = fixture.read_log();
    assert_eq!(log.matches("LOG: started sorting folder").count(), 1);
}

#[test]
fn hidden_files_are_left_alone_by_default() {
    let fixture = TestFixture::new();
    fixture.create_file(".secret.txt", b"hidden");
    fixture.create_file("visible.txt", b"doc");

    run_sort(fixture.path()).expect("run failed");

    fixture.assert_file_exists(".secret.txt");
    fixture.assert_file_exists("documents/visible.txt");
    fixture.assert_not_exists("documents/.secret.txt");
}
