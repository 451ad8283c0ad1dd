//! Filesystem backend implementations
//!
//! Concrete [`DirectoryLister`](crate::traits::DirectoryLister) and
//! [`PermissionSetter`](crate::traits::PermissionSetter) implementations: the
//! local disk, and an in-memory tree for planning and tests.

pub mod local;
pub mod memory;

// Re-export main types for convenience
pub use local::{LocalFileSystem, LocalPath};
pub use memory::{MemoryFileSystem, MemoryPath};
