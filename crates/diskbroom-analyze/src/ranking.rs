//! Top-N largest files.

use std::path::{Path, PathBuf};

use tracing::warn;

use diskbroom_core::{CleanerError, FileStat};
use diskbroom_scan::scan_recursive;

/// Find the `limit` largest files under `root`, largest first.
///
/// Files whose size cannot be read are represented by
/// [`FileStat::access_error`] and sort as zero-byte entries. Files of equal
/// size keep their discovery order.
pub fn top_files(root: &Path, limit: usize) -> Result<Vec<FileStat>, CleanerError> {
    let walk = scan_recursive(root)?;
    if limit == 0 {
        return Ok(Vec::new());
    }

    Ok(rank(walk, limit))
}

/// Stat every path and keep the `limit` largest.
fn rank(paths: impl IntoIterator<Item = PathBuf>, limit: usize) -> Vec<FileStat> {
    let mut stats: Vec<FileStat> = paths
        .into_iter()
        .map(|path| match FileStat::read(&path) {
            Ok(stat) => stat,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read file size");
                FileStat::access_error()
            }
        })
        .collect();

    // sort_by is stable, so ties stay in discovery order
    stats.sort_by(|a, b| b.size.cmp(&a.size));
    stats.truncate(limit);

    stats
}
