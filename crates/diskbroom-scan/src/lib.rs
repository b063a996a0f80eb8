//! Directory traversal for diskbroom.
//!
//! This crate walks a directory tree and yields the regular files beneath it
//! as a lazy, single-pass iterator. Traversal is serial and entries are
//! visited in sorted order, so repeated scans of an unchanged tree produce
//! the same sequence.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let walk = diskbroom_scan::scan_recursive(Path::new("/path/to/scan")).unwrap();
//! for path in walk {
//!     println!("{}", path.display());
//! }
//! ```

mod scanner;

pub use scanner::{FileWalk, ScanDepth, scan_recursive, scan_shallow};

// Re-export core types for convenience
pub use diskbroom_core::CleanerError;
