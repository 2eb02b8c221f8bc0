//! Live tree nodes and navigation
//!
//! Nodes live in the tree's arena and refer to each other by [`NodeId`].
//! A [`NodeRef`] pairs an id with the owning tree and provides the read-only
//! query surface: upward navigation, direct-children filters, substring
//! search and the local/global indices.

use crate::tree::builder::Tree;
use crate::tree::index::Index;
use crate::tree::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Arena position of a node within its tree
pub type NodeId = usize;

/// Filesystem entry kind, fixed at discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    File,
    Directory,
    Symbolic,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::File => "FILE",
            NodeType::Directory => "DIRECTORY",
            NodeType::Symbolic => "SYMBOLIC",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filesystem entry in the live graph
#[derive(Debug)]
pub struct Node {
    pub(crate) path: PathBuf,
    pub(crate) dirname: PathBuf,
    pub(crate) name: String,
    pub(crate) node_type: NodeType,
    pub(crate) checksum: Option<String>,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    /// Direct children in insertion order
    pub(crate) children: Vec<NodeId>,
    /// Direct children by path
    pub(crate) table: Index,
    /// Set once the node (and its subtree) is complete
    pub(crate) snapshot: Option<Arc<Snapshot>>,
    pub(crate) content: OnceLock<Vec<u8>>,
}

impl Node {
    pub(crate) fn new(
        path: PathBuf,
        dirname: PathBuf,
        name: String,
        node_type: NodeType,
        depth: usize,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            path,
            dirname,
            name,
            node_type,
            checksum: None,
            depth,
            parent,
            children: Vec::new(),
            table: Index::new(),
            snapshot: None,
            content: OnceLock::new(),
        }
    }

    /// Capture this node's value form from its already-captured children.
    pub(crate) fn capture(&self, nodes: Vec<Arc<Snapshot>>) -> Snapshot {
        Snapshot {
            path: self.path.to_string_lossy().into_owned(),
            dirname: self.dirname.to_string_lossy().into_owned(),
            name: self.name.clone(),
            node_type: self.node_type,
            checksum: self.checksum.clone(),
            nodes,
        }
    }
}

/// Borrowed handle on a live node
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) tree: &'a Tree,
    pub(crate) id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn path(&self) -> &'a Path {
        &self.node().path
    }

    pub fn dirname(&self) -> &'a Path {
        &self.node().dirname
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn node_type(&self) -> NodeType {
        self.node().node_type
    }

    pub fn checksum(&self) -> Option<&'a str> {
        self.node().checksum.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn is_file(&self) -> bool {
        self.node_type() == NodeType::File
    }

    pub fn is_directory(&self) -> bool {
        self.node_type() == NodeType::Directory
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Follow parent links to the node without a parent.
    pub fn root(&self) -> NodeRef<'a> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Direct children in insertion order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.node()
            .children
            .iter()
            .map(|&id| NodeRef {
                tree: self.tree,
                id,
            })
            .collect()
    }

    /// Entries of the local index matching `predicate`, in path order.
    pub fn children_where<P>(&self, mut predicate: P) -> Vec<NodeRef<'a>>
    where
        P: FnMut(&NodeRef<'a>) -> bool,
    {
        self.table()
            .iter()
            .map(|(_, id)| NodeRef {
                tree: self.tree,
                id,
            })
            .filter(|node| predicate(node))
            .collect()
    }

    /// Direct children that are files
    pub fn files(&self) -> Vec<NodeRef<'a>> {
        self.children_where(|node| node.is_file())
    }

    /// Direct children that are directories
    pub fn directories(&self) -> Vec<NodeRef<'a>> {
        self.children_where(|node| node.is_directory())
    }

    /// Direct children whose path contains `needle`.
    ///
    /// Only this node's local index is searched, never deeper descendants.
    pub fn search(&self, needle: &str) -> Vec<NodeRef<'a>> {
        self.children_where(|node| node.path().to_string_lossy().contains(needle))
    }

    /// Local index: direct children by path
    pub fn table(&self) -> &'a Index {
        &self.node().table
    }

    /// Global index owned by the tree's root
    pub fn map(&self) -> &'a Index {
        self.tree.map()
    }

    /// Value form of this node and its subtree.
    ///
    /// `TreeBuilder::build` seals every node before handing out the tree,
    /// so the childless capture is unreachable for a built tree.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match &self.node().snapshot {
            Some(snapshot) => Arc::clone(snapshot),
            None => Arc::new(self.node().capture(Vec::new())),
        }
    }

    /// Absolute form of the node's path
    pub fn uri(&self) -> PathBuf {
        std::path::absolute(self.path()).unwrap_or_else(|_| self.path().to_path_buf())
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.path())
            .field("type", &self.node_type())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}
