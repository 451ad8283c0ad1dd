//! Batch permission-change planning
//!
//! A [`ChmodPlan`] is a stack of paths plus the mode to apply to each. The root
//! goes on first, followed by every descendant in the order produced by
//! [`traverse_folder`](crate::traversal::traverse_folder). Applying the plan pops
//! the stack, so each directory is changed before anything beneath it, and the
//! root is changed last.
//!
//! A plan is only built for modes that keep owner read access. Symlinks are
//! left out entirely: changing one would change its target, which may live
//! outside the tree.
//!
//! Because directories are changed first, a mode without the owner execute bit
//! (`644`, say) removes search permission from a directory before its contents
//! are reached. For an unprivileged caller the next entry beneath it then
//! fails, and `apply` stops with the tree partly changed.

use crate::error::{PermwalkError, Result};
use crate::permissions::{check_file_permissions, parse_mode};
use crate::traits::{DirectoryLister, PermissionSetter, TreePath};
use crate::traversal::collect_descendants;
use std::fmt;
use tracing::{debug, info};

/// Counts of entries changed by [`ChmodPlan::apply`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Number of directories changed (including the root, if a directory)
    pub directories: u64,
    /// Number of non-directory entries changed
    pub files: u64,
}

impl ApplyStats {
    /// Total number of entries changed
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.directories + self.files
    }
}

impl fmt::Display for ApplyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "changed {} paths ({} directories, {} files)",
            self.total(),
            self.directories,
            self.files
        )
    }
}

/// An ordered set of pending permission changes
#[derive(Debug, Clone)]
pub struct ChmodPlan<P> {
    mode: u32,
    stack: Vec<P>,
}

impl<P: TreePath> ChmodPlan<P> {
    /// Build a plan for `root`
    ///
    /// # Parameters
    ///
    /// * `root` - Entry whose permissions change (nothing, if it is a symlink)
    /// * `lister` - Capability used to expand directories
    /// * `recursive` - Whether to include every descendant of `root`
    /// * `mode` - Octal permission string, e.g. `"750"`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `mode` does not grant the owner read access (`OwnerNotReadable`)
    /// - `mode` is not valid octal (`InvalidMode`)
    /// - a directory listing fails during the walk
    pub fn build<L>(root: P, lister: &L, recursive: bool, mode: &str) -> Result<Self>
    where
        L: DirectoryLister<Path = P> + ?Sized,
        PermwalkError: From<L::Error>,
    {
        if !check_file_permissions(mode) {
            return Err(PermwalkError::OwnerNotReadable(mode.to_string()));
        }
        let mode_bits = parse_mode(mode)?;

        let descendants = if recursive && root.is_directory() {
            collect_descendants(&root, lister)?
        } else {
            Vec::new()
        };

        // Root at the bottom: it is changed after everything it contains
        let mut stack = Vec::with_capacity(descendants.len() + 1);
        stack.push(root);
        stack.extend(descendants);

        let before = stack.len();
        stack.retain(|path| !path.is_symlink());
        if stack.len() < before {
            debug!(skipped = before - stack.len(), "Skipping symlinks");
        }

        debug!(entries = stack.len(), "Built chmod plan for mode {mode_bits:o}");
        Ok(Self {
            mode: mode_bits,
            stack,
        })
    }

    /// Get the permission bits this plan applies
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }

    /// Number of entries in the plan
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check if the plan is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterate over entries in the order they will be applied
    pub fn pop_order(&self) -> impl Iterator<Item = &P> {
        self.stack.iter().rev()
    }

    /// Apply the mode to every entry, popping the stack
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failed change. Entries popped before the
    /// failure have already been changed.
    pub fn apply<S>(mut self, setter: &S) -> Result<ApplyStats>
    where
        S: PermissionSetter<P> + ?Sized,
        PermwalkError: From<S::Error>,
    {
        let mut stats = ApplyStats::default();
        while let Some(path) = self.stack.pop() {
            setter.set_permissions(&path, self.mode)?;
            if path.is_directory() {
                stats.directories += 1;
            } else {
                stats.files += 1;
            }
        }

        info!(
            directories = stats.directories,
            files = stats.files,
            "Applied mode {:o}",
            self.mode
        );
        Ok(stats)
    }
}
