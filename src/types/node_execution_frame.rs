//! Pending node invocations of a running execution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WorkflowNode;

/// A scheduled node invocation: its own copy of the node plus the input it will run with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionFrame {
  pub node: WorkflowNode,
  #[serde(default)]
  pub data: Value,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<Value>,
}

impl NodeExecutionFrame {
  pub fn new(node: WorkflowNode, data: Value) -> Self {
    Self {
      node,
      data,
      source: None,
    }
  }
}

/// Engine bookkeeping for nodes still to run. The head of the stack runs next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStackData {
  #[serde(default)]
  pub node_execution_stack: Vec<NodeExecutionFrame>,
}
