//! Shared helpers for permwalk integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a directory tree from `/`-separated relative paths
///
/// Entries ending in `/` become directories; everything else becomes a file
/// with a little content. Parents are created as needed.
#[allow(dead_code)]
pub fn build_tree(entries: &[&str]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for entry in entries {
        let path = temp_dir.path().join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path)?;
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, entry.as_bytes())?;
        }
    }
    Ok(temp_dir)
}

/// Strip `root` from each path and render it with `/` separators
#[allow(dead_code)]
pub fn relative_names<'a>(root: &Path, paths: impl IntoIterator<Item = &'a Path>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| {
            p.strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(p))
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// Get the permission bits of `path`
#[cfg(unix)]
#[allow(dead_code)]
pub fn mode_of(path: &Path) -> anyhow::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::symlink_metadata(path)?.permissions().mode() & 0o7777)
}
