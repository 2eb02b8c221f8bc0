//! Checksum verification against independently computed digests

use super::test_utils::SHA256_HI;
use fstree::tree::checksum::{sha256_hex, Blake3Checksum, ChecksumProvider, Sha256Checksum};
use fstree::tree::{ChecksumAlgorithm, ScanConfig, Tree, TreeBuilder};
use fstree::TreeError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_sha256_of_known_content() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "hi").unwrap();

    let tree = Tree::new(temp_dir.path()).unwrap();
    assert_eq!(tree.root().files()[0].checksum(), Some(SHA256_HI));
    assert_eq!(sha256_hex(b"hi"), SHA256_HI);
}

#[test]
fn test_large_file_streams_to_same_digest() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("large.bin");
    let content: Vec<u8> = (0..(3 * 1024 * 1024)).map(|i| (i % 251) as u8).collect();
    fs::write(&file, &content).unwrap();

    assert_eq!(Sha256Checksum.digest(&file).unwrap(), sha256_hex(&content));
    assert_eq!(
        Blake3Checksum.digest(&file).unwrap(),
        blake3::hash(&content).to_hex().to_string()
    );
}

#[test]
fn test_blake3_tree_uses_blake3_digests() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "hi").unwrap();

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf())
        .with_config(ScanConfig {
            checksum: ChecksumAlgorithm::Blake3,
            ..ScanConfig::default()
        })
        .build()
        .unwrap();
    let expected = blake3::hash(b"hi").to_hex().to_string();
    assert_eq!(tree.root().files()[0].checksum(), Some(expected.as_str()));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_fails_build() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let secret = temp_dir.path().join("secret.txt");
    fs::write(&secret, "secret").unwrap();
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still read it; nothing to observe then.
    if fs::read(&secret).is_ok() {
        return;
    }

    let err = Tree::new(temp_dir.path()).unwrap_err();
    assert!(matches!(err, TreeError::Checksum { .. }));
}
