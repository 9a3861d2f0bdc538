//! Connections between workflow nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Endpoint of a connection: target node, connection type and input index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
  pub node: String,
  #[serde(rename = "type")]
  pub connection_type: String,
  pub index: usize,
}

impl ConnectionTarget {
  pub fn main(node: impl Into<String>) -> Self {
    Self {
      node: node.into(),
      connection_type: "main".to_string(),
      index: 0,
    }
  }
}

/// Outgoing connections of one node: connection type → output index → targets.
pub type NodeConnections = BTreeMap<String, Vec<Vec<ConnectionTarget>>>;

/// All connections of a workflow, keyed by source node name.
pub type Connections = BTreeMap<String, NodeConnections>;
