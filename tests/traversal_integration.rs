//! Integration tests for folder traversal against the local filesystem

mod common;

use common::{build_tree, relative_names};
use permwalk::backends::{LocalFileSystem, LocalPath};
use permwalk::traits::TreePath;
use permwalk::traversal::{collect_descendants, traverse_folder};
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

#[test]
fn test_documented_example_tree() -> anyhow::Result<()> {
    let temp_dir = build_tree(&["a", "b/c"])?;
    let root = LocalPath::new(temp_dir.path())?;

    let mut stack = Vec::new();
    traverse_folder(&root, &LocalFileSystem::new(), &mut stack)?;

    let names = relative_names(temp_dir.path(), stack.iter().map(LocalPath::path));
    assert_eq!(names, ["a", "b/c", "b"]);

    let mut popped = Vec::new();
    while let Some(entry) = stack.pop() {
        popped.push(entry.into_path_buf());
    }
    let popped = relative_names(temp_dir.path(), popped.iter().map(|p| p.as_path()));
    assert_eq!(popped, ["b", "b/c", "a"]);
    Ok(())
}

#[test]
fn test_empty_directory_appends_nothing() -> anyhow::Result<()> {
    let temp_dir = build_tree(&[])?;
    let root = LocalPath::new(temp_dir.path())?;

    let stack = collect_descendants(&root, &LocalFileSystem::new())?;
    assert!(stack.is_empty());
    Ok(())
}

#[test]
fn test_count_matches_walkdir() -> anyhow::Result<()> {
    let temp_dir = build_tree(&[
        "docs/readme.md",
        "docs/guide/intro.md",
        "docs/guide/advanced/deep.md",
        "src/main.rs",
        "src/lib/",
        "empty/",
        "top.txt",
    ])?;
    let root = LocalPath::new(temp_dir.path())?;

    let stack = collect_descendants(&root, &LocalFileSystem::new())?;

    let expected = WalkDir::new(temp_dir.path()).min_depth(1).into_iter().count();
    assert_eq!(stack.len(), expected);
    Ok(())
}

#[test]
fn test_every_directory_follows_its_descendants() -> anyhow::Result<()> {
    let temp_dir = build_tree(&[
        "x/y/z/leaf1",
        "x/y/leaf2",
        "x/leaf3",
        "w/leaf4",
        "w/v/",
        "leaf5",
    ])?;
    let root = LocalPath::new(temp_dir.path())?;

    let stack = collect_descendants(&root, &LocalFileSystem::new())?;
    let position: HashMap<&Path, usize> = stack
        .iter()
        .enumerate()
        .map(|(i, e)| (e.path(), i))
        .collect();

    for (i, entry) in stack.iter().enumerate() {
        if !entry.is_directory() {
            continue;
        }
        for other in &stack {
            if other.path() != entry.path() && other.path().starts_with(entry.path()) {
                assert!(
                    position[other.path()] < i,
                    "{} pushed after its ancestor {}",
                    other,
                    entry
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_listing_is_sorted_by_name() -> anyhow::Result<()> {
    let temp_dir = build_tree(&["c", "a", "b/"])?;
    let root = LocalPath::new(temp_dir.path())?;

    let stack = collect_descendants(&root, &LocalFileSystem::new())?;

    let names = relative_names(temp_dir.path(), stack.iter().map(LocalPath::path));
    assert_eq!(names, ["a", "b", "c"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_error_propagates() -> anyhow::Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = build_tree(&["a", "locked/secret"])?;
    let locked = temp_dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    let root = LocalPath::new(temp_dir.path())?;
    let mut stack = Vec::new();
    let result = traverse_folder(&root, &LocalFileSystem::new(), &mut stack);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    // Privileged users can list regardless of mode bits
    let Err(err) = result else {
        return Ok(());
    };
    assert!(err.to_string().contains("locked"));
    assert_eq!(
        relative_names(temp_dir.path(), stack.iter().map(LocalPath::path)),
        ["a"]
    );
    Ok(())
}
