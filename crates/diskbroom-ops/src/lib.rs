//! File mutation engines for diskbroom.
//!
//! This crate provides the two destructive batch operations:
//!
//! - **Cleanup** - delete temporary files (`*.tmp`, `*.log`) below a root
//! - **Organize** - move the root's own files into `<EXT>_Files` folders
//!
//! Both operations are best-effort per file: a file that cannot be deleted
//! or moved is recorded in the returned report and the batch continues. Only
//! an invalid root fails the whole operation. Deletion is permanent; callers
//! are expected to confirm with the user first.

mod cleanup;
mod operation;
mod organize;

pub use cleanup::{Cleaner, CleanupReport, TempFileMatcher, clean_temporary};
pub use operation::{OperationError, OperationType};
pub use organize::{OrganizeReport, Organizer, extension_of, organize};
