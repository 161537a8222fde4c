//! Candidate discovery: pre-flight check and extension-filtered directory walks.

use anyhow::Result;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions processed when none are given on the command line
pub const DEFAULT_EXTENSIONS: &[&str] = &["mkv", "mp4", "description"];

/// Fail unless `root` exists and is a directory
pub fn ensure_directory(root: &Path) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    Ok(())
}

/// Check if the file name ends with `.` followed by exactly `ext`
///
/// Matching is literal and case-sensitive: `has_extension("a.MKV", "mkv")` is false.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.'))
}

/// Find regular files under `root` whose name ends in `.<ext>`
///
/// Only direct children are considered unless `recursive` is set. Directory
/// symlinks are never followed; symlinks to regular files are kept.
pub fn scan_extension(root: &Path, ext: &str, recursive: bool) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false) // Hidden and ignored files are candidates too
        .follow_links(false)
        .max_depth(if recursive { None } else { Some(1) })
        .build();

    let mut files = Vec::new();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to access entry in {}: {}", root.display(), err);
                continue;
            }
        };

        let path = entry.path();

        if !has_extension(path, ext) {
            continue;
        }

        // is_file follows symlinks, so a link to a directory is rejected here
        if !path.is_file() {
            debug!("Skipping non-file: {}", path.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    debug!("Found {} .{} files under {}", files.len(), ext, root.display());
    files
}

/// Drop repeated extensions, keeping the first occurrence of each
pub fn dedup_extensions(extensions: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    extensions
        .iter()
        .filter(|ext| seen.insert(ext.as_str()))
        .cloned()
        .collect()
}

/// Scan every distinct extension in order and concatenate the groups
pub fn scan_candidates(root: &Path, extensions: &[String], recursive: bool) -> Vec<PathBuf> {
    dedup_extensions(extensions)
        .iter()
        .flat_map(|ext| scan_extension(root, ext, recursive))
        .collect()
}
