//! Content checksums for file nodes
//!
//! A checksum provider turns a file path into a lower-case hex digest of the
//! file's full contents. SHA-256 is the default; BLAKE3 is available through
//! configuration.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Computes a content digest for a file on disk
pub trait ChecksumProvider: Send + Sync {
    /// Digest the full contents of the file at `path`.
    fn digest(&self, path: &Path) -> Result<String, TreeError>;

    /// Short algorithm name, used in logs.
    fn name(&self) -> &'static str;
}

/// Checksum algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl ChecksumAlgorithm {
    /// Provider implementing this algorithm
    pub fn provider(self) -> Box<dyn ChecksumProvider> {
        match self {
            ChecksumAlgorithm::Sha256 => Box::new(Sha256Checksum),
            ChecksumAlgorithm::Blake3 => Box::new(Blake3Checksum),
        }
    }
}

/// SHA-256 over the file bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Checksum;

impl ChecksumProvider for Sha256Checksum {
    fn digest(&self, path: &Path) -> Result<String, TreeError> {
        let mut hasher = Sha256::new();
        stream_into(path, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    }

    fn name(&self) -> &'static str {
        "sha256"
    }
}

/// BLAKE3 over the file bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Checksum;

impl ChecksumProvider for Blake3Checksum {
    fn digest(&self, path: &Path) -> Result<String, TreeError> {
        let mut hasher = blake3::Hasher::new();
        stream_into(path, &mut hasher)?;
        Ok(hasher.finalize().to_hex().to_string())
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}

fn stream_into<W: io::Write>(path: &Path, hasher: &mut W) -> Result<(), TreeError> {
    let checksum_error = |source| TreeError::Checksum {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(checksum_error)?;
    io::copy(&mut file, hasher).map_err(checksum_error)?;
    Ok(())
}

/// SHA-256 of an in-memory buffer, hex encoded
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
