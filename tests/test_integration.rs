use safename::{
    is_sanitized, rename_files, sanitize_filename, RenameReport, SanitizeMode, ScanRequest,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn request(root: &Path, extensions: &[&str], dry_run: bool) -> ScanRequest {
    ScanRequest {
        root: root.to_path_buf(),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
        recursive: true,
        dry_run,
        verbose: false,
        mode: SanitizeMode::Advanced,
    }
}

fn run(root: &Path, extensions: &[&str], dry_run: bool) -> RenameReport {
    rename_files(&request(root, extensions, dry_run)).unwrap()
}

/// Relative path -> contents for every file under `root`
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                files.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    files
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn create_library(root: &Path) {
    fs::create_dir_all(root.join("Show [2019]/Season 1")).unwrap();
    fs::write(root.join("My Movie (2020).mkv"), "movie").unwrap();
    fs::write(root.join("My Movie (2020).description"), "about").unwrap();
    fs::write(root.join("a b.mkv"), "spaced").unwrap();
    fs::write(root.join("a_b.mkv"), "clean").unwrap();
    fs::write(root.join("a-b.mkv"), "hyphen").unwrap();
    fs::write(root.join("video.txt"), "text").unwrap();
    fs::write(root.join("Show [2019]/Season 1/S01E01 - Pilot.mp4"), "pilot").unwrap();
    fs::write(root.join("Show [2019]/Season 1/S01E02, Part 2.mp4"), "second").unwrap();
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = tempdir().unwrap();
    create_library(dir.path());

    let first = run(dir.path(), &["mkv", "mp4", "description"], false);
    assert!(first.renamed() > 0);

    let before = snapshot(dir.path());
    let second = run(dir.path(), &["mkv", "mp4", "description"], false);

    assert_eq!(second.renamed(), 0);
    assert!(second.entries.is_empty());
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_results_are_clean_and_distinct() {
    let dir = tempdir().unwrap();
    create_library(dir.path());
    let original = snapshot(dir.path());

    run(dir.path(), &["mkv", "mp4", "description"], false);

    let top = file_names(dir.path());
    for name in top.iter().filter(|n| !n.ends_with(".txt") && !n.starts_with("Show")) {
        assert!(is_sanitized(name, SanitizeMode::Advanced), "{} not sanitized", name);
    }

    // Three colliding inputs become three different files with their contents intact
    let mut contents: Vec<String> = ["a_b.mkv", "a_b_1.mkv", "a_b_2.mkv"]
        .iter()
        .map(|n| fs::read_to_string(dir.path().join(n)).unwrap())
        .collect();
    contents.sort();
    assert_eq!(contents, vec!["clean", "hyphen", "spaced"]);

    // No file was lost or overwritten
    let after = snapshot(dir.path());
    assert_eq!(after.len(), original.len());
    let mut before_data: Vec<_> = original.into_values().collect();
    let mut after_data: Vec<_> = after.into_values().collect();
    before_data.sort();
    after_data.sort();
    assert_eq!(before_data, after_data);
}

#[test]
fn test_only_requested_extensions_are_touched() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("my video.txt"), "t").unwrap();
    fs::write(dir.path().join("my video.mkv"), "k").unwrap();

    let report = run(dir.path(), &["mkv", "mp4"], false);

    assert_eq!(report.renamed(), 1);
    assert_eq!(
        file_names(dir.path()),
        BTreeSet::from([
            "my video.txt".to_string(),
            "my_video.mkv".to_string(),
        ])
    );
}

#[test]
fn test_dry_run_changes_nothing_and_predicts_count() {
    let dir = tempdir().unwrap();
    create_library(dir.path());
    let before = snapshot(dir.path());

    let preview = run(dir.path(), &["mkv", "mp4", "description"], true);
    assert_eq!(snapshot(dir.path()), before);

    let real = run(dir.path(), &["mkv", "mp4", "description"], false);
    assert_eq!(preview.renamed(), real.renamed());
    assert_eq!(real.failed(), 0);

    let planned: BTreeSet<_> = preview.entries.iter().map(|e| e.target.clone()).collect();
    let done: BTreeSet<_> = real.entries.iter().map(|e| e.target.clone()).collect();
    assert_eq!(planned, done);
}

#[test]
fn test_movie_with_numbered_copy() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("My Movie (2020).mkv"), "original").unwrap();
    fs::write(dir.path().join("My Movie (2020)_1.mkv"), "copy").unwrap();
    fs::write(dir.path().join("My_Movie__2020__1.mkv"), "existing").unwrap();

    let report = run(dir.path(), &["mkv"], false);

    assert_eq!(report.renamed(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("My_Movie__2020_.mkv")).unwrap(),
        "original"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("My_Movie__2020__1.mkv")).unwrap(),
        "existing"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("My_Movie__2020__1_1.mkv")).unwrap(),
        "copy"
    );
}

#[test]
fn test_entries_follow_extension_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a b.mkv"), "k").unwrap();
    fs::write(dir.path().join("a b.mp4"), "p").unwrap();

    let report = run(dir.path(), &["mkv", "mp4"], false);

    assert_eq!(report.renamed(), 2);
    // mkv group first, then mp4
    assert!(report.entries[0].original.ends_with("a b.mkv"));
    assert!(report.entries[1].original.ends_with("a b.mp4"));
    assert!(dir.path().join("a_b.mkv").exists());
    assert!(dir.path().join("a_b.mp4").exists());
}

#[test]
fn test_simple_mode_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a - b (1).mkv"), "x").unwrap();
    fs::write(dir.path().join("a-b.mkv"), "y").unwrap();

    let mut req = request(dir.path(), &["mkv"], false);
    req.mode = SanitizeMode::Simple;
    let report = rename_files(&req).unwrap();

    assert_eq!(report.renamed(), 1);
    assert_eq!(
        file_names(dir.path()),
        BTreeSet::from(["a_-_b_(1).mkv".to_string(), "a-b.mkv".to_string()])
    );
    assert_eq!(
        sanitize_filename("a - b (1).mkv", SanitizeMode::Simple),
        "a_-_b_(1).mkv"
    );
}
