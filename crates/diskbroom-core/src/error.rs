//! Error types for scanning and cleanup operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning or mutating a directory tree.
///
/// Root-level variants ([`PathInvalid`](Self::PathInvalid),
/// [`NotADirectory`](Self::NotADirectory), configuration errors) fail a whole
/// operation. The remaining variants describe a single entry and are
/// contained by the batch engines.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Root path does not exist or cannot be inspected.
    #[error("Invalid path: {path}")]
    PathInvalid { path: PathBuf },

    /// Root path exists but is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// A file could not be read, deleted or moved.
    #[error("Access failure at {path}: {source}")]
    AccessFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content digest could not be computed.
    ///
    /// Reserved: the built-in BLAKE3 hasher is always available, so no code
    /// path currently produces this variant. Unreadable files surface as
    /// [`AccessFailure`](Self::AccessFailure) or
    /// [`PermissionDenied`](Self::PermissionDenied) instead.
    #[error("Hash unavailable for {path}: {message}")]
    HashUnavailable { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A file name pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CleanerError {
    /// Create an access error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::AccessFailure { path, source },
        }
    }

    /// Create a root validation error from the I/O error that rejected it.
    pub fn invalid_root(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::PathInvalid { path },
        }
    }

    /// Whether this error fails a whole operation rather than a single entry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PathInvalid { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidConfig { .. }
                | Self::InvalidPattern { .. }
        )
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PathInvalid { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::AccessFailure { path, .. }
            | Self::HashUnavailable { path, .. } => Some(path),
            Self::InvalidConfig { .. } | Self::InvalidPattern { .. } => None,
        }
    }
}

/// Validate that `root` exists and is a directory.
///
/// Every operation calls this once before traversal begins.
pub fn validate_root(root: &std::path::Path) -> Result<(), CleanerError> {
    let metadata = std::fs::metadata(root).map_err(|e| CleanerError::invalid_root(root, &e))?;
    if !metadata.is_dir() {
        return Err(CleanerError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaner_error_io() {
        let err = CleanerError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CleanerError::PermissionDenied { .. }));
        assert!(!err.is_fatal());

        let err = CleanerError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CleanerError::AccessFailure { .. }));
    }

    #[test]
    fn test_validate_root_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = validate_root(&missing).unwrap_err();
        assert!(matches!(err, CleanerError::PathInvalid { .. }));
        assert!(err.is_fatal());
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn test_validate_root_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let err = validate_root(&file).unwrap_err();
        assert!(matches!(err, CleanerError::NotADirectory { .. }));
        assert!(validate_root(temp.path()).is_ok());
    }
}
