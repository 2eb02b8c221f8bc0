//! Path index over live tree nodes

use crate::tree::node::NodeId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mapping from node path to arena id.
///
/// Registration is first-writer-wins: once a path is present it is never
/// overwritten. Iteration is ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<PathBuf, NodeId>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path -> id` unless the path is already present.
    ///
    /// Returns false when an earlier registration was kept.
    pub(crate) fn register(&mut self, path: &Path, id: NodeId) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.entries.insert(path.to_path_buf(), id);
        true
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<NodeId> {
        self.entries.get(path.as_ref()).copied()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, NodeId)> {
        self.entries.iter().map(|(path, id)| (path.as_path(), *id))
    }
}
