//! Sort top-level files into per-extension folders.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use diskbroom_core::{CleanerConfig, CleanerError};
use diskbroom_scan::scan_shallow;

use crate::operation::{OperationError, OperationType, summary};

/// Extension of a file name: the text after the last `.`.
///
/// Names without a dot, names whose only dot is the leading one (`.bashrc`)
/// and names ending in a dot have no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    let extension = &name[dot + 1..];
    (!extension.is_empty()).then_some(extension)
}

/// Results from an organize run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeReport {
    /// Files moved, as (source, destination) pairs.
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Files left in place because they have no extension or are symlinks.
    pub skipped: Vec<PathBuf>,
    /// Folders created by this run.
    pub created_dirs: Vec<PathBuf>,
    /// Files that could not be moved.
    pub errors: Vec<OperationError>,
    /// Entries the scan could not read, so they were never considered.
    pub entries_skipped: u64,
}

impl OrganizeReport {
    /// Check if every file with an extension was moved.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a human-readable summary of the run.
    pub fn summary(&self) -> String {
        summary(OperationType::Organize, self.moved.len(), self.errors.len())
    }
}

/// Moves the files directly inside a root into `<EXT>_Files` folders.
pub struct Organizer {
    config: CleanerConfig,
}

impl Organizer {
    /// Create an organizer using the `_Files` folder suffix.
    pub fn new() -> Self {
        Self {
            config: CleanerConfig::default(),
        }
    }

    /// Create an organizer with a custom configuration.
    pub fn with_config(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Organize the files directly inside `root`.
    ///
    /// Subdirectories are never entered, so folders created by a previous
    /// run are left alone. Symlinks stay where they are, since a relative
    /// link would no longer resolve from inside a folder. A file that cannot
    /// be moved is recorded in the report and the remaining files are still
    /// processed.
    pub fn run(&self, root: &Path) -> Result<OrganizeReport, CleanerError> {
        let mut report = OrganizeReport::default();

        // Bucket first so each folder is created once.
        let mut buckets: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        let mut walk = scan_shallow(root)?;
        for path in walk.by_ref() {
            if is_symlink(&path) {
                debug!(path = %path.display(), "symlink, leaving in place");
                report.skipped.push(path);
                continue;
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            match extension_of(&name) {
                Some(extension) => buckets
                    .entry(extension.to_uppercase())
                    .or_default()
                    .push(path),
                None => {
                    debug!(path = %path.display(), "no extension, leaving in place");
                    report.skipped.push(path);
                }
            }
        }
        report.entries_skipped = walk.skipped();

        for (label, files) in buckets {
            let target_dir = root.join(self.config.folder_for_extension(&label));

            if let Err(e) = ensure_dir(&target_dir, &mut report) {
                warn!(dir = %target_dir.display(), error = %e, "cannot create folder");
                for file in files {
                    report.errors.push(OperationError::new(
                        file,
                        format!("Failed to create {}: {e}", target_dir.display()),
                    ));
                }
                continue;
            }

            for file in files {
                let Some(file_name) = file.file_name() else {
                    continue;
                };
                let dest = target_dir.join(file_name);

                // rename() would silently replace an existing file on Unix
                if fs::symlink_metadata(&dest).is_ok() {
                    warn!(path = %file.display(), dest = %dest.display(), "destination exists");
                    report.errors.push(OperationError::new(
                        file,
                        format!("Destination already exists: {}", dest.display()),
                    ));
                    continue;
                }

                match move_file(&file, &dest) {
                    Ok(()) => report.moved.push((file, dest)),
                    Err(e) => {
                        warn!(path = %file.display(), error = %e, "cannot move file");
                        report
                            .errors
                            .push(OperationError::new(file, format!("Failed to move: {e}")));
                    }
                }
            }
        }

        info!(root = %root.display(), "{}", report.summary());

        Ok(report)
    }
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Create `dir` unless it already exists as a directory.
fn ensure_dir(dir: &Path, report: &mut OrganizeReport) -> io::Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            report.created_dirs.push(dir.to_path_buf());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Move a single file, falling back to copy + delete across filesystems.
fn move_file(source: &Path, dest: &Path) -> io::Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    fs::copy(source, dest)?;
    fs::remove_file(source)
}

/// Move the files directly inside `root` into `<EXT>_Files` folders.
pub fn organize(root: &Path) -> Result<(), CleanerError> {
    Organizer::new().run(root).map(|_| ())
}
