//! Local filesystem backend implementation
//!
//! Lists directories with `std::fs::read_dir` and changes permissions with
//! `std::fs::set_permissions`. Entry kinds come from `DirEntry::file_type`,
//! which does not follow symlinks: a symlink to a directory is a leaf, so the
//! walk can never loop or escape the root. Symlinks are never chmod'ed either,
//! since `set_permissions` would change the link target instead.

use crate::error::{PermwalkError, Result};
use crate::traits::{DirectoryLister, PermissionSetter, TreePath};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A path on the local filesystem with its entry kind captured at listing time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    path: PathBuf,
    is_dir: bool,
    is_symlink: bool,
}

impl LocalPath {
    /// Stat `path` (without following a final symlink) and wrap it
    ///
    /// # Errors
    ///
    /// Returns `Err(PermwalkError::FileSystem)` if the path cannot be stat'ed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|e| PermwalkError::io("stat", &path, &e))?;
        Ok(Self {
            is_dir: metadata.is_dir(),
            is_symlink: metadata.file_type().is_symlink(),
            path,
        })
    }

    /// Get the underlying path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the handle and return the path
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl TreePath for LocalPath {
    fn is_directory(&self) -> bool {
        self.is_dir
    }

    fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}

impl fmt::Display for LocalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Local filesystem backend
///
/// Children are returned sorted by file name so that a plan built from the
/// same tree is always the same, whatever order the kernel hands them out.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new `LocalFileSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DirectoryLister for LocalFileSystem {
    type Path = LocalPath;
    type Error = PermwalkError;

    fn list(&self, dir: &LocalPath) -> Result<Vec<LocalPath>> {
        let read_dir = std::fs::read_dir(&dir.path)
            .map_err(|e| PermwalkError::io("read directory", &dir.path, &e))?;

        let mut children = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| PermwalkError::io("read directory entry in", &dir.path, &e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| PermwalkError::io("get file type for", &entry.path(), &e))?;
            children.push(LocalPath {
                path: entry.path(),
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            });
        }
        children.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        trace!(dir = %dir, count = children.len(), "Listed directory");
        Ok(children)
    }
}

impl PermissionSetter<LocalPath> for LocalFileSystem {
    type Error = PermwalkError;

    #[cfg(unix)]
    fn set_permissions(&self, path: &LocalPath, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        if path.is_symlink {
            trace!(path = %path, "Not following symlink");
            return Ok(());
        }
        std::fs::set_permissions(&path.path, std::fs::Permissions::from_mode(mode))
            .map_err(|e| PermwalkError::io("set permissions on", &path.path, &e))
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, path: &LocalPath, mode: u32) -> Result<()> {
        if path.is_symlink {
            trace!(path = %path, "Not following symlink");
            return Ok(());
        }

        // Only the owner write bit maps onto a non-unix read-only flag
        let mut permissions = std::fs::metadata(&path.path)
            .map_err(|e| PermwalkError::io("get metadata for", &path.path, &e))?
            .permissions();
        permissions.set_readonly(mode & 0o200 == 0);
        std::fs::set_permissions(&path.path, permissions)
            .map_err(|e| PermwalkError::io("set permissions on", &path.path, &e))
    }
}
