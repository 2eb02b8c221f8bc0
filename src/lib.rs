//! fstree: In-Memory Filesystem Subtrees
//!
//! Scans a directory into a navigable tree of checksummed nodes, renders it
//! as JSON or YAML, and mirrors it to other locations with copy, replicate
//! or replace semantics.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mirror;
pub mod tree;

pub use error::{AppError, TreeError};
pub use mirror::{mirror, MirrorMode, MirrorReport, MirrorScope};
pub use tree::{NodeRef, NodeType, Snapshot, Tree, TreeBuilder};
