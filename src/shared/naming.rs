//! Naming rules for result partitions, working directories and project trees.

use chrono::{DateTime, Utc};
use std::path::Path;

/// Directory names that never hold project manifests of interest.
pub const NOISE_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__MACOSX",
    "node_modules",
    "__pycache__",
    ".venv",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
];

/// File names written by operating systems, ignored everywhere.
pub const NOISE_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub fn is_noise_directory(name: &str) -> bool {
    NOISE_DIRECTORIES.contains(&name)
}

pub fn is_noise_file(name: &str) -> bool {
    NOISE_FILES.contains(&name)
}

/// Turns an arbitrary label into a filesystem-safe slug.
///
/// Whitespace runs become `-`, anything outside `[A-Za-z0-9._-]` becomes `_`,
/// and an empty result falls back to `project`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut in_whitespace = false;

    for c in label.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            slug.push(c);
        } else {
            slug.push('_');
        }
    }

    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}

/// Compact timestamp used in directory names (`YYYYmmdd_HHMMSS`).
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Base name of the scanned input. Archives lose their `.zip` extension.
pub fn input_base_name(input: &Path) -> String {
    let is_zip = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    let name = if is_zip {
        input.file_stem()
    } else {
        input.file_name()
    };

    name.map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            // `.` and `..` have no file name until they are resolved
            input
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}
