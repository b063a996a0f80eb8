//! Core types for diskbroom.
//!
//! This crate provides the data structures shared by the scanning, analysis
//! and cleanup crates: per-file statistics, the error taxonomy, configuration
//! and size formatting.

mod config;
mod error;
mod size;
mod stat;

pub use config::{
    CleanerConfig, CleanerConfigBuilder, DEFAULT_HASH_CHUNK_SIZE, DEFAULT_ORGANIZE_SUFFIX,
    DEFAULT_TEMP_PATTERNS,
};
pub use error::{CleanerError, validate_root};
pub use size::{bytes_to_mb, format_mb, format_size};
pub use stat::FileStat;
