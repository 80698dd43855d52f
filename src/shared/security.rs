use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Maximum size of a single lock or manifest file (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum total uncompressed size of an archive (1 GiB)
pub const MAX_ARCHIVE_UNPACKED_SIZE: u64 = 1024 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. Symbolic links are not read.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Resolves a raw archive entry name to a path relative to the extraction root.
///
/// Backslashes are treated as separators. `.` segments are dropped and `..`
/// pops the previous segment. Absolute names, drive prefixes and any `..`
/// that would climb above the root are rejected with the reason as `Err`.
/// An entry that resolves to the root itself yields an empty path.
pub fn resolve_entry_path(raw_name: &str) -> std::result::Result<PathBuf, String> {
    let normalized = raw_name.replace('\\', "/");

    if normalized.starts_with('/') {
        return Err("absolute entry paths are not allowed".to_string());
    }
    if has_drive_prefix(&normalized) {
        return Err("entry paths with a drive prefix are not allowed".to_string());
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err("entry path escapes the extraction directory".to_string());
                }
            }
            other => segments.push(other),
        }
    }

    let resolved: PathBuf = segments.iter().collect();
    // A segment such as `C:` inside the name would turn into a prefix on Windows.
    if resolved
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err("entry path contains a non-relative component".to_string());
    }
    Ok(resolved)
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_returns_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        assert_eq!(validate_regular_file(&file_path, "test file").unwrap(), 4);
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "test directory");
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/file.txt");
        assert!(validate_file_size(1000, &path, MAX_FILE_SIZE).is_ok());
        let result = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_resolve_entry_path_plain() {
        assert_eq!(
            resolve_entry_path("proj/src/main.rs").unwrap(),
            PathBuf::from("proj/src/main.rs")
        );
    }

    #[test]
    fn test_resolve_entry_path_backslashes() {
        assert_eq!(
            resolve_entry_path("proj\\package.json").unwrap(),
            PathBuf::from("proj/package.json")
        );
    }

    #[test]
    fn test_resolve_entry_path_inner_parent_stays_inside() {
        assert_eq!(
            resolve_entry_path("a/b/../c.txt").unwrap(),
            PathBuf::from("a/c.txt")
        );
        assert_eq!(resolve_entry_path("./a/").unwrap(), PathBuf::from("a"));
    }

    #[test]
    fn test_resolve_entry_path_rejects_escape() {
        assert!(resolve_entry_path("../../evil.txt").is_err());
        assert!(resolve_entry_path("a/../../evil.txt").is_err());
        assert!(resolve_entry_path("a\\..\\..\\evil.txt").is_err());
    }

    #[test]
    fn test_resolve_entry_path_rejects_absolute() {
        assert!(resolve_entry_path("/etc/passwd").is_err());
        assert!(resolve_entry_path("\\windows\\system.ini").is_err());
        assert!(resolve_entry_path("C:/windows/system.ini").is_err());
        assert!(resolve_entry_path("c:evil.txt").is_err());
    }
}
