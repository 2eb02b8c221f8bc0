//! Lazy, read-once access to file node contents

use crate::error::TreeError;
use crate::tree::builder::Tree;
use crate::tree::node::{NodeId, NodeRef};
use tracing::debug;

impl<'a> NodeRef<'a> {
    /// Bytes of a file node, read from disk on first access and cached on
    /// the node for the lifetime of the tree.
    pub fn contents(&self) -> Result<&'a [u8], TreeError> {
        if !self.is_file() {
            return Err(TreeError::InvalidFileNode(self.path().to_path_buf()));
        }

        let cell = &self.node().content;
        if let Some(bytes) = cell.get() {
            return Ok(bytes.as_slice());
        }

        let uri = self.uri();
        let buffer = std::fs::read(&uri).map_err(|e| TreeError::io(&uri, e))?;
        debug!(path = %uri.display(), bytes = buffer.len(), "Loaded file contents");

        // A concurrent reader may have filled the cell first; keep theirs.
        let _ = cell.set(buffer);
        cell.get()
            .map(Vec::as_slice)
            .ok_or(TreeError::NilNode)
    }

    /// Permission bits of the entry as currently on disk
    pub fn permissions(&self) -> Result<u32, TreeError> {
        let metadata =
            std::fs::metadata(self.path()).map_err(|e| TreeError::io(self.path(), e))?;
        Ok(mode_bits(&metadata))
    }
}

impl Tree {
    /// Contents of the file node `id`; `NilNode` if no such node exists.
    pub fn contents(&self, id: NodeId) -> Result<&[u8], TreeError> {
        self.node(id).ok_or(TreeError::NilNode)?.contents()
    }
}

#[cfg(unix)]
pub(crate) fn mode_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
pub(crate) fn mode_bits(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o555
    } else {
        0o777
    }
}
