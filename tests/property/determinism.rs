//! Property-based tests for determinism guarantees

use fstree::tree::checksum::sha256_hex;
use fstree::tree::{Snapshot, Tree};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Relative file path (one or two levels) to contents
fn layout() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let name = "[a-z]{1,6}";
    let path = prop_oneof![
        name.prop_map(|n| format!("{}.f", n)),
        (name, name).prop_map(|(d, n)| format!("{}/{}.f", d, n)),
    ];
    prop::collection::btree_map(path, prop::collection::vec(any::<u8>(), 0..64), 0..12)
}

fn materialize(root: &Path, files: &BTreeMap<String, Vec<u8>>) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Test that digest computation is deterministic
#[test]
fn test_digest_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<Vec<u8>>(), any::<Vec<u8>>()),
            |(content1, content2)| {
                let hash1 = sha256_hex(&content1);
                let hash2 = sha256_hex(&content2);

                prop_assert_eq!(hash1.len(), 64);
                if content1 == content2 {
                    prop_assert_eq!(hash1, hash2);
                } else {
                    prop_assert_ne!(hash1, hash2);
                }
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Two scans of the same layout agree, and every file carries the digest
    /// of its bytes.
    #[test]
    fn test_scan_determinism_property(files in layout()) {
        let temp_dir = TempDir::new().unwrap();
        materialize(temp_dir.path(), &files);

        let first = Tree::new(temp_dir.path()).unwrap();
        let second = Tree::new(temp_dir.path()).unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

        for (relative, contents) in &files {
            let node = first.lookup(temp_dir.path().join(relative));
            prop_assert!(node.is_some());
            let expected = sha256_hex(contents);
            prop_assert_eq!(node.unwrap().checksum(), Some(expected.as_str()));
        }
    }

    /// Every node except the root is in the global index, and the JSON form
    /// parses back to the same snapshot.
    #[test]
    fn test_index_and_snapshot_agree(files in layout()) {
        let temp_dir = TempDir::new().unwrap();
        materialize(temp_dir.path(), &files);

        let tree = Tree::new(temp_dir.path()).unwrap();
        prop_assert_eq!(tree.map().len(), tree.len() - 1);

        let snapshot = tree.snapshot();
        prop_assert_eq!(snapshot.flatten().len(), tree.len());

        let parsed = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        prop_assert_eq!(&parsed, &*snapshot);
    }
}
