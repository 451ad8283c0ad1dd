//! Depth-first folder traversal for batch permission changes
//!
//! The walker appends every descendant of a root onto a caller-owned stack so
//! that each directory lands *after* everything beneath it. Popping the stack
//! then yields a directory before any of its descendants.
//!
//! ```text
//! root/
//! ├── a
//! └── b/
//!     └── c
//!
//! stack (bottom → top): [a, c, b]
//! pop order:            b, c, a
//! ```
//!
//! Traversal uses an explicit work stack of pending listings rather than
//! native recursion, so arbitrarily deep trees cannot exhaust the call stack.

use crate::traits::{DirectoryLister, TreePath};
use tracing::{debug, trace};

/// A directory whose children are still being appended
///
/// `dir` is `None` for the root frame: the root itself is never pushed.
struct Frame<P> {
    children: std::vec::IntoIter<P>,
    dir: Option<P>,
}

/// Append all descendants of `root` onto `out` in post-order
///
/// Children are visited in the order returned by `lister`. A directory child is
/// expanded first, and pushed only once all of its own descendants are on the
/// stack. Existing entries in `out` are never touched.
///
/// # Parameters
///
/// * `root` - Directory to walk (not itself appended)
/// * `lister` - Capability used to list each directory
/// * `out` - Stack receiving the descendants
///
/// # Errors
///
/// Returns the lister's error unchanged on the first failed listing. Entries
/// appended before the failure remain in `out`.
///
/// # Examples
///
/// ```rust
/// use permwalk::backends::MemoryFileSystem;
/// use permwalk::traversal::traverse_folder;
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("/root/a")?;
/// fs.add_file("/root/b/c")?;
///
/// let mut stack = Vec::new();
/// traverse_folder(&fs.entry("/root")?, &fs, &mut stack)?;
///
/// let names: Vec<_> = stack.iter().map(|e| e.name()).collect();
/// assert_eq!(names, ["a", "c", "b"]);
/// # Ok::<(), permwalk::PermwalkError>(())
/// ```
pub fn traverse_folder<L>(
    root: &L::Path,
    lister: &L,
    out: &mut Vec<L::Path>,
) -> Result<(), L::Error>
where
    L: DirectoryLister + ?Sized,
{
    let start_len = out.len();
    let mut frames = vec![Frame {
        children: lister.list(root)?.into_iter(),
        dir: None,
    }];

    while let Some(frame) = frames.last_mut() {
        match frame.children.next() {
            Some(child) if child.is_directory() => {
                let grandchildren = lister.list(&child)?;
                trace!(
                    depth = frames.len(),
                    children = grandchildren.len(),
                    "Descending into directory"
                );
                frames.push(Frame {
                    children: grandchildren.into_iter(),
                    dir: Some(child),
                });
            }
            Some(child) => out.push(child),
            None => {
                if let Some(dir) = frames.pop().and_then(|f| f.dir) {
                    out.push(dir);
                }
            }
        }
    }

    debug!(appended = out.len() - start_len, "Folder traversal complete");
    Ok(())
}

/// Collect all descendants of `root` into a fresh stack
///
/// Same ordering as [`traverse_folder`], but the caller owns the result
/// outright and can concatenate several walks without sharing a buffer.
///
/// # Errors
///
/// Returns the lister's error unchanged on the first failed listing.
pub fn collect_descendants<L>(root: &L::Path, lister: &L) -> Result<Vec<L::Path>, L::Error>
where
    L: DirectoryLister + ?Sized,
{
    let mut out = Vec::new();
    traverse_folder(root, lister, &mut out)?;
    Ok(out)
}
