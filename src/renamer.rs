//! Rename execution: collision resolution, dry-run previews and the run report.

use crate::sanitize::{sanitize_filename, SanitizeMode};
use crate::scanner::{dedup_extensions, ensure_directory, scan_extension};

use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything one run needs, fixed before the first file is touched
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    /// Extensions without the leading dot, matched case-sensitively
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub mode: SanitizeMode,
}

/// What happened to one candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameStatus {
    Renamed,
    WouldRename,
    /// The OS refused the rename; holds the error message
    Failed(String),
}

/// A candidate whose name needed changing
#[derive(Debug, Clone)]
pub struct RenameEntry {
    pub original: PathBuf,
    pub target: PathBuf,
    pub status: RenameStatus,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RenameReport {
    pub entries: Vec<RenameEntry>,
    pub dry_run: bool,
}

impl RenameReport {
    /// Files renamed, or that would be renamed in a dry run
    pub fn renamed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, RenameStatus::Renamed | RenameStatus::WouldRename))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, RenameStatus::Failed(_)))
            .count()
    }
}

/// Build `stem_N.ext` from a sanitized target path
///
/// The extension is everything after the last dot; a name without one
/// becomes `name_N`. The split ignores the requested extension, so
/// `a_b.tar.gz` becomes `a_b.tar_1.gz`.
pub fn numbered_path(target: &Path, counter: usize) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = match target.extension() {
        Some(ext) => format!("{}_{}.{}", stem, counter, ext.to_string_lossy()),
        None => format!("{}_{}", stem, counter),
    };
    target.with_file_name(name)
}

/// Pick the first free name among `target`, `stem_1.ext`, `stem_2.ext`, ...
///
/// A name is taken if it exists on disk or was already handed out in this run.
pub fn resolve_target(target: &Path, claimed: &HashSet<PathBuf>) -> PathBuf {
    let is_taken = |p: &Path| p.exists() || claimed.contains(p);

    if !is_taken(target) {
        return target.to_path_buf();
    }

    let mut counter = 1;
    loop {
        let candidate = numbered_path(target, counter);
        if !is_taken(&candidate) {
            debug!(
                "{} is taken, using {}",
                target.display(),
                candidate.display()
            );
            return candidate;
        }
        counter += 1;
    }
}

/// Sanitize and rename every matching file under the request's root.
///
/// Only the pre-flight directory check returns an error. A failed rename is
/// printed, recorded in the report and skipped.
pub fn rename_files(request: &ScanRequest) -> Result<RenameReport> {
    run_batch(request, |from, to| fs::rename(from, to))
}

/// Drive the whole batch with `rename` as the filesystem move
fn run_batch<F>(request: &ScanRequest, rename: F) -> Result<RenameReport>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    ensure_directory(&request.root)?;

    info!(
        "Scanning {} for {}",
        request.root.display(),
        request.extensions.join(", ")
    );

    let mut report = RenameReport {
        entries: Vec::new(),
        dry_run: request.dry_run,
    };
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    // A dry run leaves originals in place, so a later group could see them again
    let mut seen: HashSet<PathBuf> = HashSet::new();

    // Each group is scanned only after the previous one was renamed
    for ext in &dedup_extensions(&request.extensions) {
        for path in scan_extension(&request.root, ext, request.recursive) {
            if !seen.insert(path.clone()) {
                debug!("Already handled: {}", path.display());
                continue;
            }
            if let Some(entry) = process_file(&path, request, &mut claimed, &rename) {
                report.entries.push(entry);
            }
        }
    }

    Ok(report)
}

/// Handle one candidate; `None` when its name is already clean
fn process_file(
    path: &Path,
    request: &ScanRequest,
    claimed: &mut HashSet<PathBuf>,
    rename: &impl Fn(&Path, &Path) -> io::Result<()>,
) -> Option<RenameEntry> {
    let name = path.file_name()?.to_str()?;
    let sanitized = sanitize_filename(name, request.mode);
    if sanitized == name {
        return None;
    }

    let naive_target = path.with_file_name(&sanitized);
    let target = resolve_target(&naive_target, claimed);

    let status = if request.dry_run {
        println!(
            "{} {} -> {}",
            "Would rename:".yellow(),
            path.display(),
            target.display()
        );
        RenameStatus::WouldRename
    } else {
        match rename(path, &target) {
            Ok(_) => {
                if request.verbose {
                    println!(
                        "{} {} -> {}",
                        "Renamed:".green(),
                        path.display(),
                        target.display()
                    );
                }
                RenameStatus::Renamed
            }
            Err(err) => {
                eprintln!("{} {}: {}", "Error renaming".red(), path.display(), err);
                return Some(RenameEntry {
                    original: path.to_path_buf(),
                    target,
                    status: RenameStatus::Failed(err.to_string()),
                });
            }
        }
    };

    claimed.insert(target.clone());

    Some(RenameEntry {
        original: path.to_path_buf(),
        target,
        status,
    })
}

/// Print the closing count line
pub fn print_summary(report: &RenameReport) {
    let count = report.renamed();
    if report.dry_run {
        println!(
            "Dry run complete. Would rename {} files.",
            count.to_string().bold()
        );
    } else {
        println!("Renamed {} files.", count.to_string().bold());
    }

    let failed = report.failed();
    if failed > 0 {
        eprintln!("{}", format!("Failed to rename {} files.", failed).red());
    }
}
