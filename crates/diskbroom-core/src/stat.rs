//! Per-file statistics.

use std::fmt;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::size::bytes_to_mb;

/// Immutable description of a single scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// File name (last path component).
    pub name: CompactString,
    /// Size in bytes.
    pub size: u64,
    /// Path as discovered during the scan.
    pub path: PathBuf,
}

impl FileStat {
    /// Name used for entries whose metadata could not be read.
    pub const ACCESS_ERROR_NAME: &'static str = "access error";

    /// Create a new file stat.
    pub fn new(name: impl Into<CompactString>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Read the size of `path` and build its stat.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        Ok(Self::new(name.as_ref(), metadata.len(), path))
    }

    /// Read the stat for `path`, substituting the access error placeholder
    /// when the metadata cannot be read.
    pub fn read_or_placeholder(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|_| Self::access_error())
    }

    /// Placeholder for an unreadable entry: zero size and an empty path.
    pub fn access_error() -> Self {
        Self::new(Self::ACCESS_ERROR_NAME, 0, PathBuf::new())
    }

    /// Whether this is the access error placeholder.
    pub fn is_access_error(&self) -> bool {
        self.name == Self::ACCESS_ERROR_NAME && self.size == 0 && self.path.as_os_str().is_empty()
    }

    /// Size in megabytes.
    pub fn size_mb(&self) -> f64 {
        bytes_to_mb(self.size)
    }
}

impl fmt::Display for FileStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<30} | {:>10.2} MB", self.name.as_str(), self.size_mb())
    }
}
