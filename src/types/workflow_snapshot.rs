//! Snapshot of a workflow definition as of the time an execution started.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ConnectionTarget, Connections, WorkflowNode};

/// Denormalized copy of the owning workflow stored with each execution.
///
/// This, not the live workflow, is what a resumed execution is rebuilt from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub active: bool,
  pub nodes: Vec<WorkflowNode>,
  #[serde(default)]
  pub connections: Connections,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub static_data: Option<Value>,
  #[serde(default)]
  pub settings: Map<String, Value>,
}

impl WorkflowSnapshot {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      active: false,
      nodes: Vec::new(),
      connections: Connections::new(),
      static_data: None,
      settings: Map::new(),
    }
  }

  pub fn with_node(mut self, node: WorkflowNode) -> Self {
    self.nodes.push(node);
    self
  }

  /// Adds a `main` connection from output 0 of `from` to input 0 of `to`.
  pub fn with_main_connection(mut self, from: &str, to: &str) -> Self {
    let outputs = self
      .connections
      .entry(from.to_string())
      .or_default()
      .entry("main".to_string())
      .or_default();
    if outputs.is_empty() {
      outputs.push(Vec::new());
    }
    outputs[0].push(ConnectionTarget::main(to));
    self
  }
}
