//! In-memory filesystem backend
//!
//! A tree of paths held in a `HashMap`, with children kept in insertion order.
//! Useful for dry planning against a described tree, and for exercising the
//! walker and the chmod plan without touching the disk. Listing failures can
//! be injected per directory, and symlinks can be added as leaves.

use crate::error::{PermwalkError, Result};
use crate::traits::{DirectoryLister, PermissionSetter, TreePath};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default mode given to new entries
const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;
const SYMLINK_MODE: u32 = 0o777;

/// Handle to an entry of a [`MemoryFileSystem`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryPath {
    path: PathBuf,
    is_dir: bool,
    is_symlink: bool,
}

impl MemoryPath {
    /// Get the full path of this entry
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the final component (empty for the filesystem root)
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
    }
}

impl TreePath for MemoryPath {
    fn is_directory(&self) -> bool {
        self.is_dir
    }

    fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}

impl fmt::Display for MemoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug)]
struct Node {
    is_dir: bool,
    is_symlink: bool,
    mode: u32,
    children: Vec<PathBuf>,
}

impl Node {
    fn new(is_dir: bool) -> Self {
        Self {
            is_dir,
            is_symlink: false,
            mode: if is_dir { DEFAULT_DIR_MODE } else { DEFAULT_FILE_MODE },
            children: Vec::new(),
        }
    }

    fn handle(&self, path: &Path) -> MemoryPath {
        MemoryPath {
            path: path.to_path_buf(),
            is_dir: self.is_dir,
            is_symlink: self.is_symlink,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<PathBuf, Node>,
    failing: HashSet<PathBuf>,
    history: Vec<(PathBuf, u32)>,
}

impl Inner {
    /// Insert `path` and any missing ancestors, returning an error if an
    /// ancestor already exists as a file
    fn insert(&mut self, path: &Path, is_dir: bool) -> Result<()> {
        if let Some(existing) = self.nodes.get(path) {
            if existing.is_dir == is_dir {
                return Ok(());
            }
            return Err(PermwalkError::FileSystem(format!(
                "{} already exists with a different type",
                path.display()
            )));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.insert(parent, true)?;
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.push(path.to_path_buf());
            }
        }
        self.nodes.insert(path.to_path_buf(), Node::new(is_dir));
        Ok(())
    }
}

/// In-memory filesystem
///
/// Single-threaded: state lives behind a `RefCell`, so the same instance can
/// be both lister and permission setter for a plan.
///
/// # Examples
///
/// ```rust
/// use permwalk::backends::MemoryFileSystem;
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("/srv/app/config.toml")?;
/// fs.add_dir("/srv/app/logs")?;
///
/// assert!(fs.entry("/srv/app/logs")?.name() == "logs");
/// assert_eq!(fs.mode_of("/srv/app/config.toml"), Some(0o644));
/// # Ok::<(), permwalk::PermwalkError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    inner: RefCell<Inner>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns `Err(PermwalkError::FileSystem)` if the path or an ancestor
    /// already exists with the other entry type.
    pub fn add_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.borrow_mut().insert(path.as_ref(), false)
    }

    /// Add a directory, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns `Err(PermwalkError::FileSystem)` if the path or an ancestor
    /// already exists as a file.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.borrow_mut().insert(path.as_ref(), true)
    }

    /// Add a symbolic link, creating missing parent directories
    ///
    /// The link is a leaf with mode `777`, and permission changes on it are
    /// ignored, as they are for links on the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns `Err(PermwalkError::FileSystem)` if the path is a directory or
    /// an ancestor already exists as a file.
    pub fn add_symlink(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut inner = self.inner.borrow_mut();
        inner.insert(path, false)?;
        if let Some(node) = inner.nodes.get_mut(path) {
            node.is_symlink = true;
            node.mode = SYMLINK_MODE;
        }
        Ok(())
    }

    /// Look up an entry handle
    ///
    /// # Errors
    ///
    /// Returns `Err(PermwalkError::NotFound)` if the path was never added.
    pub fn entry(&self, path: impl AsRef<Path>) -> Result<MemoryPath> {
        let path = path.as_ref();
        self.inner
            .borrow()
            .nodes
            .get(path)
            .map(|node| node.handle(path))
            .ok_or_else(|| PermwalkError::NotFound(path.to_path_buf()))
    }

    /// Make every future listing of `path` fail
    pub fn fail_listing(&self, path: impl AsRef<Path>) {
        self.inner
            .borrow_mut()
            .failing
            .insert(path.as_ref().to_path_buf());
    }

    /// Get the current mode of `path`, if present
    #[must_use]
    pub fn mode_of(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.inner
            .borrow()
            .nodes
            .get(path.as_ref())
            .map(|node| node.mode)
    }

    /// Get every permission change applied so far, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<(PathBuf, u32)> {
        self.inner.borrow().history.clone()
    }
}

impl DirectoryLister for MemoryFileSystem {
    type Path = MemoryPath;
    type Error = PermwalkError;

    fn list(&self, dir: &MemoryPath) -> Result<Vec<MemoryPath>> {
        let inner = self.inner.borrow();
        if inner.failing.contains(&dir.path) {
            return Err(PermwalkError::FileSystem(format!(
                "Failed to read directory {}: permission denied",
                dir.path.display()
            )));
        }

        let node = inner
            .nodes
            .get(&dir.path)
            .ok_or_else(|| PermwalkError::NotFound(dir.path.clone()))?;

        Ok(node
            .children
            .iter()
            .filter_map(|child| inner.nodes.get(child).map(|n| n.handle(child)))
            .collect())
    }
}

impl PermissionSetter<MemoryPath> for MemoryFileSystem {
    type Error = PermwalkError;

    fn set_permissions(&self, path: &MemoryPath, mode: u32) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let node = inner
            .nodes
            .get_mut(&path.path)
            .ok_or_else(|| PermwalkError::NotFound(path.path.clone()))?;
        if node.is_symlink {
            return Ok(());
        }
        node.mode = mode;
        inner.history.push((path.path.clone(), mode));
        Ok(())
    }
}
