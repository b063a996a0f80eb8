//! Cleanup and analysis configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default file name patterns treated as temporary files.
pub const DEFAULT_TEMP_PATTERNS: &[&str] = &["*.tmp", "*.log"];

/// Default suffix appended to per-extension folders.
pub const DEFAULT_ORGANIZE_SUFFIX: &str = "_Files";

/// Default read chunk size for content hashing (8 KiB).
pub const DEFAULT_HASH_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration shared by the cleanup, organize and duplicate engines.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CleanerConfig {
    /// File name patterns (glob syntax, case-insensitive) deleted by cleanup.
    #[builder(default = "default_temp_patterns()")]
    #[serde(default = "default_temp_patterns")]
    pub temp_patterns: Vec<String>,

    /// Suffix appended to the uppercase extension to name organize folders.
    #[builder(default = "DEFAULT_ORGANIZE_SUFFIX.to_string()")]
    #[serde(default = "default_organize_suffix")]
    pub organize_suffix: String,

    /// Read chunk size used when hashing file content.
    #[builder(default = "DEFAULT_HASH_CHUNK_SIZE")]
    #[serde(default = "default_hash_chunk_size")]
    pub hash_chunk_size: usize,

    /// Minimum file size considered by duplicate detection.
    #[builder(default = "1")]
    #[serde(default = "default_min_duplicate_size")]
    pub min_duplicate_size: u64,
}

fn default_temp_patterns() -> Vec<String> {
    DEFAULT_TEMP_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_organize_suffix() -> String {
    DEFAULT_ORGANIZE_SUFFIX.to_string()
}

fn default_hash_chunk_size() -> usize {
    DEFAULT_HASH_CHUNK_SIZE
}

fn default_min_duplicate_size() -> u64 {
    1
}

impl CleanerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.hash_chunk_size {
            return Err("Hash chunk size must be greater than zero".to_string());
        }
        if let Some(ref suffix) = self.organize_suffix {
            if suffix.is_empty() {
                return Err("Organize suffix cannot be empty".to_string());
            }
            if suffix.contains(['/', '\\']) {
                return Err(format!("Organize suffix cannot contain a path separator: {suffix}"));
            }
        }
        if let Some(ref patterns) = self.temp_patterns {
            if patterns.is_empty() {
                return Err("At least one temporary file pattern is required".to_string());
            }
        }
        Ok(())
    }
}

impl CleanerConfig {
    /// Create a new config builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Folder name used for files with the given extension.
    ///
    /// The extension is uppercased, so `jpg` and `JPG` share a folder.
    pub fn folder_for_extension(&self, extension: &str) -> String {
        format!("{}{}", extension.to_uppercase(), self.organize_suffix)
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            temp_patterns: default_temp_patterns(),
            organize_suffix: default_organize_suffix(),
            hash_chunk_size: DEFAULT_HASH_CHUNK_SIZE,
            min_duplicate_size: 1,
        }
    }
}
