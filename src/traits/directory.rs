//! Directory listing traits
//!
//! [`TreePath`] is the opaque handle the walker moves into its output, and
//! [`DirectoryLister`] is the capability that expands a directory into its
//! children.

/// A location in a tree that can report whether it is a directory
///
/// Implementations are usually small value types (a path plus a cached file
/// type). The walker calls `is_directory` exactly once per entry.
pub trait TreePath {
    /// Check if this entry is a directory that should be descended into
    ///
    /// # Returns
    ///
    /// Returns `true` for directories, `false` for files, symlinks and
    /// anything else treated as a leaf.
    fn is_directory(&self) -> bool;

    /// Check if this entry is a symbolic link
    ///
    /// Symlinks are walked past but never have their permissions changed.
    /// Backends without links keep the default.
    fn is_symlink(&self) -> bool {
        false
    }
}

/// Capability that lists the direct children of a directory
///
/// # Type Parameters
///
/// * `Path` - The path handle produced and consumed by this lister
/// * `Error` - The failure type; the walker returns it unchanged
///
/// # Examples
///
/// ```rust
/// use permwalk::backends::MemoryFileSystem;
/// use permwalk::traits::DirectoryLister;
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("/data/a.txt")?;
///
/// let children = fs.list(&fs.entry("/data")?)?;
/// assert_eq!(children.len(), 1);
/// # Ok::<(), permwalk::PermwalkError>(())
/// ```
pub trait DirectoryLister {
    /// The path handle type for this lister
    type Path: TreePath;

    /// The error type raised when a listing fails
    type Error;

    /// Read the children of `path`
    ///
    /// # Parameters
    ///
    /// * `path` - Directory to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(children)` in the order they should be visited. An empty
    /// `Vec` means the directory has no children and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Err(Self::Error)` if the directory cannot be read (access
    /// denied, I/O error, vanished path).
    fn list(&self, path: &Self::Path) -> Result<Vec<Self::Path>, Self::Error>;
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L {
    type Path = L::Path;
    type Error = L::Error;

    fn list(&self, path: &Self::Path) -> Result<Vec<Self::Path>, Self::Error> {
        (**self).list(path)
    }
}
