//! JWalk-based serial directory scanner.

use std::path::{Path, PathBuf};

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::debug;

use diskbroom_core::{CleanerError, validate_root};

type EntryIter = Box<dyn Iterator<Item = Result<DirEntry<((), ())>, jwalk::Error>>>;

/// How far below the root a scan descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    /// Visit every nested subdirectory.
    Recursive,
    /// Visit only the root's direct children.
    Shallow,
}

impl ScanDepth {
    fn max_depth(self) -> usize {
        match self {
            Self::Recursive => usize::MAX,
            Self::Shallow => 1,
        }
    }
}

/// Lazy, single-pass sequence of regular-file paths under a root.
///
/// Directories, symlinks to directories, dangling symlinks and special files
/// are never yielded. A symlink whose target is a regular file is yielded as
/// the symlink path. Entries that cannot be read are skipped and counted.
pub struct FileWalk {
    root: PathBuf,
    entries: EntryIter,
    skipped: u64,
}

impl FileWalk {
    /// Start a walk under `root`.
    ///
    /// Fails before yielding anything if `root` does not exist or is not a
    /// directory.
    pub fn new(root: &Path, depth: ScanDepth) -> Result<Self, CleanerError> {
        validate_root(root)?;

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1)
            .max_depth(depth.max_depth());

        Ok(Self {
            root: root.to_path_buf(),
            entries: Box::new(walker.into_iter()),
            skipped: 0,
        })
    }

    /// Root this walk was started from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of entries skipped so far because they could not be read.
    ///
    /// This includes directories whose contents could not be listed, so a
    /// non-zero count after the walk means the traversal was partial.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for FileWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.skipped += 1;
                    debug!(
                        path = ?err.path(),
                        error = %err,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };

            // jwalk reports an unreadable directory as the entry itself
            if let Some(err) = &entry.read_children_error {
                self.skipped += 1;
                debug!(
                    path = %entry.path().display(),
                    error = %err,
                    "skipping unreadable directory"
                );
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_file() {
                return Some(entry.path());
            }

            if file_type.is_symlink() {
                let path = entry.path();
                match std::fs::metadata(&path) {
                    Ok(target) if target.is_file() => return Some(path),
                    Ok(_) => {}
                    Err(err) => {
                        debug!(path = %path.display(), error = %err, "skipping dangling symlink");
                    }
                }
            }
        }
    }
}

/// Walk every regular file below `root`, descending into subdirectories.
pub fn scan_recursive(root: &Path) -> Result<FileWalk, CleanerError> {
    FileWalk::new(root, ScanDepth::Recursive)
}

/// Walk the regular files directly inside `root`.
pub fn scan_shallow(root: &Path) -> Result<FileWalk, CleanerError> {
    FileWalk::new(root, ScanDepth::Shallow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("b.txt"), "bb").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join(".hidden"), "h").unwrap();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/c.txt"), "ccc").unwrap();
        fs::write(root.join("sub/deeper/d.txt"), "dddd").unwrap();

        temp
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_recursive_yields_all_files() {
        let temp = create_test_tree();
        let mut files: Vec<PathBuf> = scan_recursive(temp.path()).unwrap().collect();
        files.sort();

        assert_eq!(files.len(), 5);
        assert!(files.iter().all(|p| p.is_file()));
        assert!(files.contains(&temp.path().join("sub/deeper/d.txt")));
        assert!(files.contains(&temp.path().join(".hidden")));
    }

    #[test]
    fn test_shallow_skips_subdirectories() {
        let temp = create_test_tree();
        let files: Vec<PathBuf> = scan_shallow(temp.path()).unwrap().collect();

        let mut found = names(&files);
        found.sort();
        assert_eq!(found, vec![".hidden", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_discovery_order_is_sorted_by_name() {
        let temp = create_test_tree();
        let files: Vec<PathBuf> = scan_shallow(temp.path()).unwrap().collect();
        assert_eq!(names(&files), vec![".hidden", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_invalid_root() {
        let temp = create_test_tree();

        let missing = scan_recursive(&temp.path().join("missing"));
        assert!(matches!(missing, Err(CleanerError::PathInvalid { .. })));

        let file = scan_shallow(&temp.path().join("a.txt"));
        assert!(matches!(file, Err(CleanerError::NotADirectory { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let walk = scan_recursive(temp.path()).unwrap();
        assert_eq!(walk.root(), temp.path());
        assert_eq!(walk.count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_policy() {
        let temp = create_test_tree();
        let root = temp.path();

        std::os::unix::fs::symlink(root.join("a.txt"), root.join("link_to_file")).unwrap();
        std::os::unix::fs::symlink(root.join("sub"), root.join("link_to_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("dangling")).unwrap();

        let files: Vec<PathBuf> = scan_shallow(root).unwrap().collect();
        let found = names(&files);

        assert!(found.contains(&"link_to_file".to_string()));
        assert!(!found.contains(&"link_to_dir".to_string()));
        assert!(!found.contains(&"dangling".to_string()));

        // Symlinked directories are not descended into.
        let recursive: Vec<PathBuf> = scan_recursive(root).unwrap().collect();
        assert!(!recursive.iter().any(|p| p.starts_with(root.join("link_to_dir"))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_counted() {
        use std::os::unix::fs::PermissionsExt;

        let temp = create_test_tree();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut walk = scan_recursive(temp.path()).unwrap();
        let files: Vec<PathBuf> = walk.by_ref().collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(files.len(), 5);
        assert_eq!(walk.skipped(), 1);
    }
}
