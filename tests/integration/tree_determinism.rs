//! Integration tests for tree building determinism

use fstree::tree::{Snapshot, Tree};
use std::fs;
use tempfile::TempDir;

fn checksums(snapshot: &Snapshot) -> Vec<(String, Option<String>)> {
    snapshot
        .flatten()
        .into_iter()
        .map(|s| (s.path.clone(), s.checksum.clone()))
        .collect()
}

/// The same filesystem yields the same snapshot
#[test]
fn test_same_filesystem_same_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();
    fs::create_dir(root.join("dir1")).unwrap();
    fs::write(root.join("dir1").join("file3.txt"), "content3").unwrap();

    let first = Tree::new(&root).unwrap();
    let second = Tree::new(&root).unwrap();

    assert_eq!(*first.snapshot(), *second.snapshot());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

/// Identical content under different names has identical digests
#[test]
fn test_identical_content_identical_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("one.txt"), "same bytes").unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("two.txt"), "same bytes").unwrap();

    let tree = Tree::new(root).unwrap();
    let one = tree.lookup(root.join("one.txt")).unwrap();
    let two = tree.lookup(root.join("nested").join("two.txt")).unwrap();
    assert_eq!(one.checksum(), two.checksum());
}

/// Content changes are visible after a rebuild
#[test]
fn test_file_content_change_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::write(root.join("test.txt"), "content1").unwrap();

    let before = Tree::new(&root).unwrap();
    fs::write(root.join("test.txt"), "content2").unwrap();
    let after = Tree::new(&root).unwrap();

    assert_ne!(checksums(&before.snapshot()), checksums(&after.snapshot()));
}

/// Snapshot order is by file name regardless of creation order
#[test]
fn test_sibling_order_is_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for name in ["zeta", "alpha", "mid", "Beta"] {
        fs::write(root.join(name), name).unwrap();
    }

    let tree = Tree::new(root).unwrap();
    let names: Vec<_> = tree
        .snapshot()
        .nodes
        .iter()
        .map(|n| n.name.clone())
        .collect();
    assert_eq!(names, vec!["Beta", "alpha", "mid", "zeta"]);

    let child_names: Vec<_> = tree.root().children().iter().map(|n| n.name()).collect();
    assert_eq!(child_names, vec!["Beta", "alpha", "mid", "zeta"]);
}
