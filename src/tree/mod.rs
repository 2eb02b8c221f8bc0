//! Filesystem Tree
//!
//! Represents a directory subtree in memory twice: as a live, navigable graph
//! of nodes (arena plus path indices) and as an immutable snapshot tree used
//! for serialization. Both are produced by the same depth-first scan.

pub mod builder;
pub mod checksum;
pub mod content;
pub mod index;
pub mod node;
pub mod snapshot;
pub mod walker;

pub use builder::{ScanConfig, ScanWarning, Tree, TreeBuilder};
pub use checksum::{ChecksumAlgorithm, ChecksumProvider};
pub use index::Index;
pub use node::{NodeId, NodeRef, NodeType};
pub use snapshot::Snapshot;
