//! Integration tests for the three mirror modes

use super::test_utils::scenario_tree;
#[cfg(unix)]
use super::test_utils::permissions_of;
use fstree::{mirror, MirrorMode, MirrorScope, Tree, TreeError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn source(temp_dir: &TempDir) -> PathBuf {
    let source = temp_dir.path().join("source");
    scenario_tree(&source);
    source
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Copy leaves a divergent existing file alone
#[test]
fn test_copy_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::create_dir(&destination).unwrap();
    fs::write(destination.join("a.txt"), "different").unwrap();

    tree.root().copy(&destination).unwrap();

    assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "different");
    assert!(destination.join("b").is_dir());
}

/// Copy into an empty destination writes direct file children
#[test]
fn test_copy_into_empty_destination() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");

    let report = tree.root().copy(&destination).unwrap();

    assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "hi");
    assert_eq!(report.files_written, 1);
    assert_eq!(report.files_skipped, 0);
}

/// Replicate overwrites content and keeps an existing directory's mode
#[test]
fn test_replicate_overwrites_content() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::create_dir_all(destination.join("b")).unwrap();
    fs::write(destination.join("a.txt"), "different").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(destination.join("b"), fs::Permissions::from_mode(0o711)).unwrap();
    }

    tree.root().replicate(&destination).unwrap();

    assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "hi");
    #[cfg(unix)]
    assert_eq!(permissions_of(&destination.join("b")), 0o711);
}

/// Replace leaves exactly the direct children of the source
#[test]
fn test_replace_mirrors_direct_children_only() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::create_dir_all(destination.join("b").join("old")).unwrap();
    fs::write(destination.join("b").join("c.txt"), "stale").unwrap();
    fs::write(destination.join("unrelated.txt"), "unrelated").unwrap();
    fs::write(destination.join("a.txt"), "different").unwrap();

    tree.root().replace(&destination).unwrap();

    assert_eq!(entries(&destination), vec!["a.txt", "b"]);
    assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "hi");
    assert!(entries(&destination.join("b")).is_empty());
}

/// Replace onto a plain file swaps it for a directory
#[test]
fn test_replace_over_file_destination() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::write(&destination, "not a directory").unwrap();

    tree.root().replace(&destination).unwrap();
    assert!(destination.is_dir());
    assert_eq!(entries(&destination), vec!["a.txt", "b"]);
}

/// The opt-in subtree scope reaches nested files
#[test]
fn test_subtree_replace_mirrors_everything() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::create_dir_all(&destination).unwrap();
    fs::write(destination.join("unrelated.txt"), "unrelated").unwrap();

    let report = mirror(
        tree.root(),
        &destination,
        MirrorMode::Replace,
        MirrorScope::Subtree,
    )
    .unwrap();

    assert_eq!(entries(&destination), vec!["a.txt", "b"]);
    assert_eq!(
        fs::read_to_string(destination.join("b").join("c.txt")).unwrap(),
        "c"
    );
    assert_eq!(report.files_written, 2);
}

/// Subtree copy still skips files that already exist
#[test]
fn test_subtree_copy_skips_existing_nested_file() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let destination = temp_dir.path().join("dest");
    fs::create_dir_all(destination.join("b")).unwrap();
    fs::write(destination.join("b").join("c.txt"), "mine").unwrap();

    let report = mirror(
        tree.root(),
        &destination,
        MirrorMode::Copy,
        MirrorScope::Subtree,
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(destination.join("b").join("c.txt")).unwrap(),
        "mine"
    );
    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.files_written, 1);
}

/// Mirroring from a file node is rejected
#[test]
fn test_mirror_from_file_node() {
    let temp_dir = TempDir::new().unwrap();
    let tree = Tree::new(source(&temp_dir)).unwrap();
    let file = tree.root().files()[0];

    let err = file.replicate(temp_dir.path().join("dest")).unwrap_err();
    assert!(matches!(err, TreeError::InvalidDirectoryNode(_)));
    assert!(!temp_dir.path().join("dest").exists());
}

/// Directory modes are re-read from disk when mirroring
#[cfg(unix)]
#[test]
fn test_directory_mode_read_at_call_time() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let source = source(&temp_dir);
    let tree = Tree::new(&source).unwrap();

    fs::set_permissions(source.join("b"), fs::Permissions::from_mode(0o700)).unwrap();
    let destination = temp_dir.path().join("dest");
    tree.root().copy(&destination).unwrap();

    assert_eq!(permissions_of(&destination.join("b")), 0o700);
}
