//! Single-level directory listing for the tree builder

use crate::tree::node::NodeType;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One immediate entry of a directory, classified without following links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub node_type: NodeType,
}

/// Listing configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Sort entries by file name (default: true for determinism)
    pub sort_entries: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self { sort_entries: true }
    }
}

/// Lists the immediate entries of one directory
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new() -> Self {
        Self {
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// List the entries directly inside `dir`.
    ///
    /// Symbolic links are reported as such and never followed. Entry paths
    /// are `dir` joined with the raw file name, so they stay relative when
    /// `dir` is relative and keep non-UTF-8 bytes intact.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>, walkdir::Error> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let file_type = entry.file_type();

            let node_type = if file_type.is_symlink() {
                NodeType::Symbolic
            } else if file_type.is_dir() {
                NodeType::Directory
            } else {
                NodeType::File
            };

            entries.push(Entry {
                path: dir.join(entry.file_name()),
                name: entry.file_name().to_string_lossy().into_owned(),
                node_type,
            });
        }

        Ok(entries)
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}
