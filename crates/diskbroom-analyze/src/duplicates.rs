//! Duplicate file detection using content hashing.
//!
//! Every non-empty file under the root is hashed in full and grouped by its
//! fingerprint. Group membership is only final once the whole tree has been
//! visited, so groups are accumulated first and single-member groups are
//! dropped at the end.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use diskbroom_core::{CleanerConfig, CleanerError};
use diskbroom_scan::scan_recursive;

use crate::hasher::ContentHasher;

/// A group of files sharing the same content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Hex fingerprint shared by all files in this group.
    pub hash: String,

    /// Size of each file in bytes.
    pub size: u64,

    /// Paths to all duplicate files, in discovery order.
    pub paths: Vec<PathBuf>,

    /// Wasted space: size * (count - 1).
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    fn new(hash: String, size: u64, paths: Vec<PathBuf>) -> Self {
        let wasted_bytes = size * (paths.len() as u64).saturating_sub(1);
        Self {
            hash,
            size,
            paths,
            wasted_bytes,
        }
    }

    /// Get the number of duplicate files.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// If keeping one file, how many could be deleted.
    pub fn deletable_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Results from duplicate analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Groups of duplicate files, sorted by wasted space descending.
    pub groups: Vec<DuplicateGroup>,

    /// Number of files whose content was hashed.
    pub files_hashed: u64,

    /// Number of entries excluded because they could not be read, including
    /// directories the scan could not list.
    pub files_skipped: u64,
}

impl DuplicateReport {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Total number of files across all groups.
    pub fn total_duplicate_files(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }

    /// Total space that could be reclaimed by keeping one copy per group.
    pub fn total_wasted_space(&self) -> u64 {
        self.groups.iter().map(|g| g.wasted_bytes).sum()
    }

    /// Convert into a plain fingerprint to paths mapping.
    pub fn into_map(self) -> HashMap<String, Vec<PathBuf>> {
        self.groups.into_iter().map(|g| (g.hash, g.paths)).collect()
    }
}

/// Duplicate file finder.
pub struct DuplicateFinder {
    min_size: u64,
    hasher: ContentHasher,
}

impl DuplicateFinder {
    /// Create a finder that skips empty files and hashes in 8 KiB chunks.
    pub fn new() -> Self {
        Self::with_config(&CleanerConfig::default())
    }

    /// Create a finder from a cleaner configuration.
    pub fn with_config(config: &CleanerConfig) -> Self {
        Self {
            min_size: config.min_duplicate_size.max(1),
            hasher: ContentHasher::with_chunk_size(config.hash_chunk_size),
        }
    }

    /// Find duplicate files under `root`.
    pub fn find(&self, root: &Path) -> Result<DuplicateReport, CleanerError> {
        let mut walk = scan_recursive(root)?;

        let mut hash_groups: HashMap<String, (u64, Vec<PathBuf>)> = HashMap::new();
        let mut files_hashed = 0u64;
        let mut files_skipped = 0u64;

        for path in walk.by_ref() {
            let size = match std::fs::metadata(&path) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "excluding unreadable file");
                    files_skipped += 1;
                    continue;
                }
            };

            if size < self.min_size {
                continue;
            }

            let hash = match self.hasher.try_hash(&path) {
                Ok(hash) => hash,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "excluding unhashable file");
                    files_skipped += 1;
                    continue;
                }
            };

            files_hashed += 1;
            hash_groups
                .entry(hash)
                .or_insert_with(|| (size, Vec::new()))
                .1
                .push(path);
        }

        files_skipped += walk.skipped();

        let mut groups: Vec<DuplicateGroup> = hash_groups
            .into_iter()
            .filter(|(_, (_, paths))| paths.len() >= 2)
            .map(|(hash, (size, paths))| DuplicateGroup::new(hash, size, paths))
            .collect();

        groups.sort_by(|a, b| {
            b.wasted_bytes
                .cmp(&a.wasted_bytes)
                .then_with(|| a.paths[0].cmp(&b.paths[0]))
        });

        info!(
            root = %root.display(),
            files_hashed,
            files_skipped,
            groups = groups.len(),
            "duplicate scan complete"
        );

        Ok(DuplicateReport {
            groups,
            files_hashed,
            files_skipped,
        })
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Find groups of files under `root` with identical content.
///
/// Only groups with at least two members are returned. Empty files and files
/// that cannot be read are ignored.
pub fn find_duplicates(root: &Path) -> Result<HashMap<String, Vec<PathBuf>>, CleanerError> {
    Ok(DuplicateFinder::new().find(root)?.into_map())
}
