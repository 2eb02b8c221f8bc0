//! Tree builder for constructing in-memory filesystem trees

use crate::error::TreeError;
use crate::tree::checksum::{ChecksumAlgorithm, ChecksumProvider};
use crate::tree::index::Index;
use crate::tree::node::{Node, NodeId, NodeRef, NodeType};
use crate::tree::snapshot::Snapshot;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace, warn};

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Digest algorithm for file nodes
    #[serde(default)]
    pub checksum: ChecksumAlgorithm,

    /// Visit siblings in file-name order instead of raw listing order
    #[serde(default = "default_sort_entries")]
    pub sort_entries: bool,
}

fn default_sort_entries() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            checksum: ChecksumAlgorithm::default(),
            sort_entries: default_sort_entries(),
        }
    }
}

/// A directory whose scan was abandoned during construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error reading {}: {}", self.path.display(), self.message)
    }
}

/// A constructed filesystem tree
///
/// Owns every live node (the arena), the root-wide path index and the
/// warnings raised while scanning. Nothing changes after construction apart
/// from per-file content caches.
#[derive(Debug)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    index: Index,
    warnings: Vec<ScanWarning>,
}

const ROOT_ID: NodeId = 0;

impl Tree {
    /// Build a tree for the directory at `path` with default settings.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        TreeBuilder::new(path.as_ref().to_path_buf()).build()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: ROOT_ID,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Resolve a path through the global index (or the root's own path).
    pub fn lookup(&self, path: impl AsRef<Path>) -> Option<NodeRef<'_>> {
        let path = path.as_ref();
        if path == self.nodes[ROOT_ID].path {
            return Some(self.root());
        }
        self.index.get(path).and_then(|id| self.node(id))
    }

    /// Every node inserted under the root, by path
    pub fn map(&self) -> &Index {
        &self.index
    }

    /// All nodes in discovery order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |id| NodeRef { tree: self, id })
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.root().snapshot()
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        self.snapshot().to_json()
    }

    pub fn to_yaml(&self) -> Result<String, TreeError> {
        self.snapshot().to_yaml()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.snapshot(), f)
    }
}

/// Tree builder for constructing filesystem trees
pub struct TreeBuilder {
    root: PathBuf,
    config: ScanConfig,
    checksum: Option<Box<dyn ChecksumProvider>>,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: ScanConfig::default(),
            checksum: None,
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific checksum provider instead of the configured algorithm.
    pub fn with_checksum(mut self, provider: Box<dyn ChecksumProvider>) -> Self {
        self.checksum = Some(provider);
        self
    }

    /// Build the tree depth-first.
    ///
    /// Every directory's subtree is complete before the directory is
    /// registered with its parent, so a node reachable through an index
    /// always has its whole subtree populated.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<Tree, TreeError> {
        let start = Instant::now();
        info!("Starting tree build");

        match std::fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => {}
            _ => {
                error!("Root is missing or not a directory");
                return Err(TreeError::InvalidDirectory(self.root.clone()));
            }
        }

        let fallback;
        let checksum: &dyn ChecksumProvider = match &self.checksum {
            Some(provider) => provider.as_ref(),
            None => {
                fallback = self.config.checksum.provider();
                fallback.as_ref()
            }
        };
        let scan = Scan {
            walker: Walker::with_config(WalkerConfig {
                sort_entries: self.config.sort_entries,
            }),
            checksum,
        };

        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.to_string_lossy().into_owned());
        let dirname = match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tree = Tree {
            nodes: vec![Node::new(
                self.root.clone(),
                dirname,
                name,
                NodeType::Directory,
                0,
                None,
            )],
            index: Index::new(),
            warnings: Vec::new(),
        };

        scan.walk(&mut tree, ROOT_ID)?;
        scan.seal(&mut tree, ROOT_ID);

        info!(
            node_count = tree.len(),
            warning_count = tree.warnings.len(),
            checksum = checksum.name(),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(tree)
    }
}

struct Scan<'a> {
    walker: Walker,
    checksum: &'a dyn ChecksumProvider,
}

impl Scan<'_> {
    /// Insert every entry of the directory node `id`.
    fn walk(&self, tree: &mut Tree, id: NodeId) -> Result<(), TreeError> {
        let dir = tree.nodes[id].path.clone();
        let entries = match self.walker.list(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                let warning = ScanWarning {
                    path: dir,
                    message: e.to_string(),
                };
                warn!(path = %warning.path.display(), error = %warning.message, "Abandoning directory scan");
                tree.warnings.push(warning);
                return Ok(());
            }
        };

        for entry in entries {
            self.add(tree, id, entry)?;
        }
        Ok(())
    }

    /// Construct one child completely, then register it with its parent.
    fn add(&self, tree: &mut Tree, parent: NodeId, entry: Entry) -> Result<(), TreeError> {
        let parent_node = &tree.nodes[parent];
        let mut node = Node::new(
            entry.path,
            parent_node.path.clone(),
            entry.name,
            entry.node_type,
            parent_node.depth + 1,
            Some(parent),
        );

        if node.node_type == NodeType::File {
            let digest = self.checksum.digest(&node.path)?;
            trace!(path = %node.path.display(), digest = %digest, "Computed checksum");
            node.checksum = Some(digest);
        }

        let id = tree.nodes.len();
        tree.nodes.push(node);

        if tree.nodes[id].node_type == NodeType::Directory {
            self.walk(tree, id)?;
        }
        self.seal(tree, id);

        let path = tree.nodes[id].path.clone();
        if !tree.index.register(&path, id) {
            debug!(path = %path.display(), "Path already in global index");
        }
        let parent_node = &mut tree.nodes[parent];
        if !parent_node.table.register(&path, id) {
            debug!(path = %path.display(), "Path already in local index");
        }
        parent_node.children.push(id);

        Ok(())
    }

    /// Capture the snapshot of a node whose children are all sealed.
    fn seal(&self, tree: &mut Tree, id: NodeId) {
        let nodes: Vec<Arc<Snapshot>> = tree.nodes[id]
            .children
            .iter()
            .filter_map(|&child| tree.nodes[child].snapshot.clone())
            .collect();
        let snapshot = tree.nodes[id].capture(nodes);
        tree.nodes[id].snapshot = Some(Arc::new(snapshot));
    }
}
