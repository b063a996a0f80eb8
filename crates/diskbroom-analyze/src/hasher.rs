//! Streaming content fingerprints.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use blake3::Hasher;
use tracing::debug;

use diskbroom_core::{CleanerError, DEFAULT_HASH_CHUNK_SIZE};

/// Prefix of the placeholder returned when a file cannot be hashed.
pub const ERROR_HASH_PREFIX: &str = "error_hash_";

/// Computes BLAKE3 fingerprints of file content, reading in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    chunk_size: usize,
}

impl ContentHasher {
    /// Create a hasher reading 8 KiB at a time.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_HASH_CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom read chunk size (minimum 1 byte).
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Read chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash the content of `path` as a lowercase hex string.
    pub fn try_hash(&self, path: &Path) -> Result<String, CleanerError> {
        let mut file = File::open(path).map_err(|e| CleanerError::io(path, e))?;
        let mut hasher = Hasher::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CleanerError::io(path, e)),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().to_hex().to_string())
    }

    /// Hash the content of `path`, returning [`error_hash`] for unreadable files.
    pub fn hash(&self, path: &Path) -> String {
        self.try_hash(path).unwrap_or_else(|err| {
            debug!(path = %path.display(), error = %err, "hash failed, using placeholder");
            error_hash(path)
        })
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder fingerprint for a file that could not be read.
///
/// Derived from the file name only, so two unreadable files with the same
/// name produce the same value.
pub fn error_hash(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    format!("{ERROR_HASH_PREFIX}{name}")
}

/// Hash a file with the default chunk size.
pub fn hash(path: &Path) -> String {
    ContentHasher::new().hash(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identical_content_same_hash() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "same bytes").unwrap();
        fs::write(temp.path().join("two.bin"), "same bytes").unwrap();
        fs::write(temp.path().join("three.txt"), "other bytes").unwrap();

        let hasher = ContentHasher::new();
        let one = hasher.hash(&temp.path().join("one.txt"));
        let two = hasher.hash(&temp.path().join("two.bin"));
        let three = hasher.hash(&temp.path().join("three.txt"));

        assert_eq!(one, two);
        assert_ne!(one, three);
        assert_eq!(one.len(), 64);
        assert!(one.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_matches_one_shot_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.bin");
        let content: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &content).unwrap();

        let expected = blake3::hash(&content).to_hex().to_string();
        assert_eq!(ContentHasher::new().hash(&path), expected);
        // Chunk boundaries do not affect the digest.
        assert_eq!(ContentHasher::with_chunk_size(7).hash(&path), expected);
    }

    #[test]
    fn test_unreadable_file_uses_placeholder() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("ghost.dat");

        assert_eq!(hash(&missing), "error_hash_ghost.dat");
        assert!(ContentHasher::new().try_hash(&missing).is_err());
    }

    #[test]
    fn test_chunk_size_minimum() {
        assert_eq!(ContentHasher::with_chunk_size(0).chunk_size(), 1);
        assert_eq!(ContentHasher::default().chunk_size(), 8192);
    }
}
