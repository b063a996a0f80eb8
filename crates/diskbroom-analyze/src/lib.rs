//! Analysis algorithms for diskbroom.
//!
//! This crate provides read-only analysis of a directory tree:
//!
//! - **Largest files** - rank files by size and keep the top N
//! - **Duplicate detection** - group files by BLAKE3 content fingerprint
//! - **Content hashing** - streaming fingerprints in fixed-size chunks
//!
//! Every call walks the tree again; nothing is cached between calls.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use diskbroom_analyze::{DuplicateFinder, top_files};
//!
//! let root = Path::new("/path/to/scan");
//!
//! for stat in top_files(root, 10).unwrap() {
//!     println!("{stat}");
//! }
//!
//! let report = DuplicateFinder::new().find(root).unwrap();
//! println!("Found {} duplicate groups", report.groups.len());
//! println!("Wasted space: {} bytes", report.total_wasted_space());
//! ```

mod duplicates;
mod hasher;
mod ranking;

pub use duplicates::{DuplicateFinder, DuplicateGroup, DuplicateReport, find_duplicates};
pub use hasher::{ContentHasher, ERROR_HASH_PREFIX, error_hash, hash};
pub use ranking::top_files;

// Re-export core types
pub use diskbroom_core::{CleanerConfig, CleanerError, FileStat};
