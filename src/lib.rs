//! safename - Media File Name Sanitizer
//!
//! Renames files with selected extensions so their names contain no spaces,
//! separators, quotes, brackets or shell punctuation. Every unsafe character
//! becomes an underscore, and a numeric suffix (`name_1.mkv`, `name_2.mkv`, ...)
//! keeps the result from overwriting an existing file.
//!
//! ## Modes
//!
//! - `simple`: spaces only
//! - `advanced`: the full set in [`sanitize::UNSAFE_CHARS`], hyphen and comma included

pub mod logging;
pub mod renamer;
pub mod sanitize;
pub mod scanner;

// Re-export commonly used items
pub use renamer::{
    numbered_path, print_summary, rename_files, resolve_target, RenameEntry, RenameReport,
    RenameStatus, ScanRequest,
};
pub use sanitize::{is_sanitized, sanitize_filename, SanitizeMode, UNSAFE_CHARS};
pub use scanner::{
    dedup_extensions, ensure_directory, has_extension, scan_candidates, scan_extension,
    DEFAULT_EXTENSIONS,
};
