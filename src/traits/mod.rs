//! Core traits for filesystem abstraction
//!
//! The traversal and the chmod plan never touch a filesystem directly. They go
//! through these seams so the same ordering logic runs against the local disk,
//! an in-memory tree, or anything else a caller plugs in.

pub mod directory;
pub mod permissions;

pub use directory::{DirectoryLister, TreePath};
pub use permissions::PermissionSetter;
