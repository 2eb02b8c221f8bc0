//! Serializable value tree captured during construction
//!
//! Each snapshot is taken once its node is complete (for directories, after
//! the whole subtree was walked) and is never touched again. Parents hold
//! their children's snapshots through `Arc`, so capturing a directory does
//! not copy the subtree below it.

use crate::error::TreeError;
use crate::tree::node::NodeType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub path: String,
    pub dirname: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Arc<Snapshot>>,
}

impl Snapshot {
    /// Render as JSON indented with four spaces.
    pub fn to_json(&self) -> Result<String, TreeError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| TreeError::Serialization(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, TreeError> {
        serde_yaml::to_string(self).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, TreeError> {
        serde_json::from_str(text).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, TreeError> {
        serde_yaml::from_str(text).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    /// Pre-order walk over this snapshot and all nested snapshots.
    pub fn flatten(&self) -> Vec<&Snapshot> {
        let mut out = vec![self];
        for child in &self.nodes {
            out.extend(child.flatten());
        }
        out
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
