use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to tell a rejected archive apart from
/// an ordinary failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - SBOM artifacts written or detection printed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing input, malformed lock file, file I/O error, etc.)
    ApplicationError = 3,
    /// The input was rejected by a safety check (path traversal, size bound)
    SecurityViolation = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error returned by a use case.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<SbomError>().map(SbomError::kind) {
            Some(ErrorKind::SecurityViolation) => ExitCode::SecurityViolation,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::SecurityViolation => write!(f, "Security Violation (4)"),
        }
    }
}

/// Error taxonomy shared by every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    SecurityViolation,
    Io,
}

/// Application-specific errors for SBOM extraction.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Input not found: {path}\n\n💡 Hint: Please pass an existing project directory or .zip archive")]
    InputNotFound { path: PathBuf },

    #[error("Lock file not found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("Invalid input: {path}\nReason: {reason}\n\n💡 Hint: Please pass a project directory or a readable .zip archive")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Failed to parse {path}\nDetails: {details}\n\n💡 Hint: Please verify that the lock file is well-formed")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityViolation {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl SbomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SbomError::InputNotFound { .. } | SbomError::LockfileNotFound { .. } => {
                ErrorKind::NotFound
            }
            SbomError::InvalidInput { .. } | SbomError::ManifestParseError { .. } => {
                ErrorKind::InvalidInput
            }
            SbomError::SecurityViolation { .. } => ErrorKind::SecurityViolation,
            SbomError::FileReadError { .. } | SbomError::FileWriteError { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
        assert_eq!(ExitCode::SecurityViolation.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::SecurityViolation),
            "Security Violation (4)"
        );
    }

    #[test]
    fn test_exit_code_for_security_error() {
        let error: anyhow::Error = SbomError::SecurityViolation {
            path: PathBuf::from("../../evil.txt"),
            reason: "escapes".to_string(),
            hint: "hint".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&error), ExitCode::SecurityViolation);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let error: anyhow::Error = SbomError::InputNotFound {
            path: PathBuf::from("/missing"),
        }
        .into();
        assert_eq!(ExitCode::for_error(&error), ExitCode::ApplicationError);

        let plain = anyhow::anyhow!("plain failure");
        assert_eq!(ExitCode::for_error(&plain), ExitCode::ApplicationError);
    }

    #[test]
    fn test_error_kinds() {
        let not_found = SbomError::LockfileNotFound {
            path: PathBuf::from("Cargo.lock"),
            suggestion: "run cargo generate-lockfile".to_string(),
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let parse = SbomError::ManifestParseError {
            path: PathBuf::from("package-lock.json"),
            details: "expected value".to_string(),
        };
        assert_eq!(parse.kind(), ErrorKind::InvalidInput);

        let write = SbomError::FileWriteError {
            path: PathBuf::from("sbom.json"),
            details: "denied".to_string(),
        };
        assert_eq!(write.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_lockfile_not_found_display() {
        let error = SbomError::LockfileNotFound {
            path: PathBuf::from("/test/path/Cargo.lock"),
            suggestion: "Test suggestion".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Lock file not found"));
        assert!(display.contains("/test/path/Cargo.lock"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Test suggestion"));
    }

    #[test]
    fn test_manifest_parse_error_display() {
        let error = SbomError::ManifestParseError {
            path: PathBuf::from("/test/uv.lock"),
            details: "Invalid TOML syntax".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse"));
        assert!(display.contains("/test/uv.lock"));
        assert!(display.contains("Invalid TOML syntax"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_security_violation_display() {
        let error = SbomError::SecurityViolation {
            path: PathBuf::from("../../evil.txt"),
            reason: "Entry escapes the working directory".to_string(),
            hint: "Rebuild the archive with relative paths".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("../../evil.txt"));
        assert!(display.contains("Entry escapes the working directory"));
        assert!(display.contains("Rebuild the archive"));
    }
}
