//! Operation types shared by the mutating engines.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The kind of batch operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    Cleanup,
    Organize,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cleanup => write!(f, "Cleanup"),
            Self::Organize => write!(f, "Organize"),
        }
    }
}

/// A per-entry failure recorded during a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Summary line for a finished batch operation.
pub(crate) fn summary(operation: OperationType, succeeded: usize, failed: usize) -> String {
    let action = match operation {
        OperationType::Cleanup => "Deleted",
        OperationType::Organize => "Moved",
    };

    if failed == 0 {
        format!("{action} {succeeded} files")
    } else {
        format!("{action} {succeeded} files, {failed} failed")
    }
}
