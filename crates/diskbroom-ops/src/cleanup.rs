//! Temporary file cleanup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use diskbroom_core::{CleanerConfig, CleanerError, FileStat};
use diskbroom_scan::scan_recursive;

use crate::operation::{OperationError, OperationType, summary};

/// Case-insensitive file name matcher for temporary files.
#[derive(Debug, Clone)]
pub struct TempFileMatcher {
    set: GlobSet,
}

impl TempFileMatcher {
    /// Compile glob patterns such as `*.tmp`.
    pub fn new(patterns: &[String]) -> Result<Self, CleanerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| CleanerError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| CleanerError::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { set })
    }

    /// Whether the file name of `path` matches one of the patterns.
    pub fn is_match(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.set.is_match(name))
    }
}

/// Results from a cleanup run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Bytes of the files that were actually deleted.
    pub bytes_freed: u64,
    /// Files that were deleted.
    pub deleted: Vec<PathBuf>,
    /// Files that matched but could not be sized or deleted.
    pub errors: Vec<OperationError>,
    /// Entries the scan could not read, so they were never considered.
    pub entries_skipped: u64,
}

impl CleanupReport {
    /// Check if every matching file was deleted.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a human-readable summary of the run.
    pub fn summary(&self) -> String {
        summary(OperationType::Cleanup, self.deleted.len(), self.errors.len())
    }
}

/// Deletes temporary files below a root.
pub struct Cleaner {
    matcher: TempFileMatcher,
}

impl Cleaner {
    /// Create a cleaner matching `*.tmp` and `*.log`.
    pub fn new() -> Result<Self, CleanerError> {
        Self::with_config(&CleanerConfig::default())
    }

    /// Create a cleaner using the configured temporary file patterns.
    pub fn with_config(config: &CleanerConfig) -> Result<Self, CleanerError> {
        Ok(Self {
            matcher: TempFileMatcher::new(&config.temp_patterns)?,
        })
    }

    /// Snapshot the matching files below `root` without touching them,
    /// along with the number of entries the scan could not read.
    fn snapshot(&self, root: &Path) -> Result<(Vec<FileStat>, u64), CleanerError> {
        let mut walk = scan_recursive(root)?;
        let files = walk
            .by_ref()
            .filter(|path| self.matcher.is_match(path))
            .map(|path| {
                let size = reclaimable_size(&path).unwrap_or(0);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                FileStat::new(name, size, path)
            })
            .collect();
        Ok((files, walk.skipped()))
    }

    /// List the files a cleanup of `root` would delete, with the bytes each
    /// one would free.
    ///
    /// Files whose size cannot be read are listed with size 0.
    pub fn plan(&self, root: &Path) -> Result<Vec<FileStat>, CleanerError> {
        Ok(self.snapshot(root)?.0)
    }

    /// Delete exactly the files in `plan`.
    ///
    /// Nothing outside the plan is touched, even if new matches appeared
    /// since it was taken. Sizes are re-read just before each deletion and
    /// only files that were actually removed count towards
    /// [`CleanupReport::bytes_freed`].
    pub fn execute(&self, plan: &[FileStat]) -> CleanupReport {
        let mut report = CleanupReport::default();

        for stat in plan {
            let path = &stat.path;
            let size = match reclaimable_size(path) {
                Ok(size) => size,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read size, skipping");
                    report.errors.push(OperationError::new(
                        path.clone(),
                        format!("Failed to read size: {e}"),
                    ));
                    continue;
                }
            };

            match fs::remove_file(path) {
                Ok(()) => {
                    report.bytes_freed += size;
                    report.deleted.push(path.clone());
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot delete file");
                    report
                        .errors
                        .push(OperationError::new(path.clone(), format!("Failed to delete: {e}")));
                }
            }
        }

        info!(bytes_freed = report.bytes_freed, "{}", report.summary());

        report
    }

    /// Delete every matching file below `root`.
    ///
    /// The full list of matches is collected before the first deletion.
    pub fn run(&self, root: &Path) -> Result<CleanupReport, CleanerError> {
        let (plan, entries_skipped) = self.snapshot(root)?;
        if entries_skipped > 0 {
            warn!(root = %root.display(), entries_skipped, "some entries could not be scanned");
        }

        let mut report = self.execute(&plan);
        report.entries_skipped = entries_skipped;
        Ok(report)
    }
}

/// Bytes freed by removing `path`.
///
/// Removing a symlink never frees its target, so links count as zero.
fn reclaimable_size(path: &Path) -> io::Result<u64> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        Ok(0)
    } else {
        Ok(metadata.len())
    }
}

/// Delete `*.tmp` and `*.log` files below `root`, returning the bytes freed.
pub fn clean_temporary(root: &Path) -> Result<u64, CleanerError> {
    Ok(Cleaner::new()?.run(root)?.bytes_freed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> TempFileMatcher {
        TempFileMatcher::new(&["*.tmp".to_string(), "*.log".to_string()]).unwrap()
    }

    #[test]
    fn test_matcher_is_case_insensitive() {
        let m = matcher();
        assert!(m.is_match(Path::new("/a/build.tmp")));
        assert!(m.is_match(Path::new("/a/SERVER.LOG")));
        assert!(m.is_match(Path::new("/a/Mixed.Tmp")));
        assert!(m.is_match(Path::new("/a/.tmp")));
    }

    #[test]
    fn test_matcher_rejects_other_names() {
        let m = matcher();
        assert!(!m.is_match(Path::new("/a/notes.txt")));
        assert!(!m.is_match(Path::new("/a/catalog")));
        assert!(!m.is_match(Path::new("/a/archive.tmp.gz")));
        assert!(!m.is_match(Path::new("/a/blog")));
    }

    #[test]
    fn test_matcher_uses_file_name_only() {
        let m = matcher();
        assert!(!m.is_match(Path::new("/dir.tmp/keep.txt")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = TempFileMatcher::new(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, CleanerError::InvalidPattern { .. }));
    }

    #[test]
    fn test_reclaimable_size_of_regular_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("build.tmp");
        fs::write(&path, [0u8; 64]).unwrap();

        assert_eq!(reclaimable_size(&path).unwrap(), 64);
        assert!(reclaimable_size(&temp.path().join("gone.tmp")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_reclaimable_size_of_symlink_is_zero() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("big.dat");
        fs::write(&target, vec![0u8; 4096]).unwrap();
        let link = temp.path().join("alias.tmp");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(reclaimable_size(&link).unwrap(), 0);
    }
}
