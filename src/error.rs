//! Error types for permwalk
//!
//! Listing failures raised by a [`DirectoryLister`](crate::traits::DirectoryLister)
//! are surfaced by the traversal exactly as the lister produced them. This enum is
//! the error type of the bundled backends and of the chmod plan.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by permwalk backends and planning
#[derive(Debug, Error)]
pub enum PermwalkError {
    /// Filesystem operation failed (message carries the path and the cause)
    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// Mode string could not be parsed as octal permission bits
    #[error("Invalid mode '{0}': expected 3 or 4 octal digits")]
    InvalidMode(String),

    /// Mode would leave the owner without read access
    #[error("Mode '{0}' does not grant the owner read permission")]
    OwnerNotReadable(String),

    /// Path is not present in the backing filesystem
    #[error("No such path: {}", .0.display())]
    NotFound(PathBuf),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PermwalkError>;

impl PermwalkError {
    /// Build a `FileSystem` error from an I/O failure on `path`
    pub(crate) fn io(action: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::FileSystem(format!("Failed to {action} {}: {err}", path.display()))
    }
}
