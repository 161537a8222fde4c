//! File name sanitization.

use clap::ValueEnum;
use std::fmt;

/// Characters replaced in advanced mode.
///
/// Includes the full-width colon (U+FF1A) and the big solidus (U+29F8), which
/// video downloaders commonly substitute for `:` and `/` in titles.
pub const UNSAFE_CHARS: &[char] = &[
    ' ', '/', ':', '\u{FF1A}', '\u{29F8}', '\'', '"', '(', ')', '[', ']', '&', '|', '*', '?',
    '<', '>', ',', '-',
];

/// Character every unsafe character is replaced with
pub const REPLACEMENT: char = '_';

/// Which characters count as unsafe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SanitizeMode {
    /// Replace spaces only
    Simple,
    /// Replace spaces, separators, quotes, brackets and shell punctuation
    #[default]
    Advanced,
}

impl SanitizeMode {
    /// Check if a character must be replaced under this mode
    pub fn is_unsafe(self, c: char) -> bool {
        match self {
            SanitizeMode::Simple => c == ' ',
            SanitizeMode::Advanced => UNSAFE_CHARS.contains(&c),
        }
    }

    /// Name used on the command line and in the configuration summary
    pub fn as_str(self) -> &'static str {
        match self {
            SanitizeMode::Simple => "simple",
            SanitizeMode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SanitizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace every unsafe character in `name` with an underscore.
///
/// Each occurrence becomes its own underscore, so `"a  b"` maps to `"a__b"`.
pub fn sanitize_filename(name: &str, mode: SanitizeMode) -> String {
    name.chars()
        .map(|c| if mode.is_unsafe(c) { REPLACEMENT } else { c })
        .collect()
}

/// Check if a name is already free of unsafe characters
pub fn is_sanitized(name: &str, mode: SanitizeMode) -> bool {
    !name.chars().any(|c| mode.is_unsafe(c))
}
