//! Queryable workflow graph rebuilt from an execution's workflow snapshot.
//!
//! A graph is built fresh for every resume attempt and never mutated afterwards.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::types::{ConnectionTarget, Connections, WorkflowNode, WorkflowSnapshot};

/// Snapshot that does not form a valid graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
  #[error("workflow \"{workflow_id}\" contains node \"{node}\" more than once")]
  DuplicateNode { workflow_id: String, node: String },
  #[error("workflow \"{workflow_id}\" has connections from unknown node \"{node}\"")]
  UnknownSource { workflow_id: String, node: String },
  #[error("workflow \"{workflow_id}\" connects \"{from}\" to unknown node \"{to}\"")]
  UnknownTarget {
    workflow_id: String,
    from: String,
    to: String,
  },
}

/// Immutable workflow graph: nodes by name, outgoing connections, static data and settings.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
  pub id: String,
  pub name: String,
  pub active: bool,
  nodes: HashMap<String, WorkflowNode>,
  connections: Connections,
  static_data: Option<Value>,
  settings: Map<String, Value>,
}

impl WorkflowGraph {
  /// Builds the graph from `snapshot`. Node names must be unique and every connection must
  /// reference existing nodes.
  #[instrument(level = "trace", skip(snapshot), fields(workflow_id = %snapshot.id))]
  pub fn build(snapshot: &WorkflowSnapshot) -> Result<Self, GraphError> {
    let mut nodes = HashMap::with_capacity(snapshot.nodes.len());
    for node in &snapshot.nodes {
      if nodes.insert(node.name.clone(), node.clone()).is_some() {
        return Err(GraphError::DuplicateNode {
          workflow_id: snapshot.id.clone(),
          node: node.name.clone(),
        });
      }
    }

    for (from, by_type) in &snapshot.connections {
      if !nodes.contains_key(from) {
        return Err(GraphError::UnknownSource {
          workflow_id: snapshot.id.clone(),
          node: from.clone(),
        });
      }
      let unknown = by_type
        .values()
        .flatten()
        .flatten()
        .find(|t| !nodes.contains_key(&t.node));
      if let Some(target) = unknown {
        return Err(GraphError::UnknownTarget {
          workflow_id: snapshot.id.clone(),
          from: from.clone(),
          to: target.node.clone(),
        });
      }
    }

    Ok(Self {
      id: snapshot.id.clone(),
      name: snapshot.name.clone(),
      active: snapshot.active,
      nodes,
      connections: snapshot.connections.clone(),
      static_data: snapshot.static_data.clone(),
      settings: snapshot.settings.clone(),
    })
  }

  pub fn node(&self, name: &str) -> Option<&WorkflowNode> {
    self.nodes.get(name)
  }

  pub fn nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
    self.nodes.values()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn static_data(&self) -> Option<&Value> {
    self.static_data.as_ref()
  }

  pub fn settings(&self) -> &Map<String, Value> {
    &self.settings
  }

  fn targets_of<'a>(
    &'a self,
    name: &str,
  ) -> impl Iterator<Item = &'a ConnectionTarget> + use<'a> {
    self
      .connections
      .get(name)
      .into_iter()
      .flat_map(|by_type| by_type.values().flatten().flatten())
  }

  /// Names of nodes directly connected to an output of `name`, in connection order, deduplicated.
  pub fn child_nodes(&self, name: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for target in self.targets_of(name) {
      if !out.contains(&target.node.as_str()) {
        out.push(target.node.as_str());
      }
    }
    out
  }
}
