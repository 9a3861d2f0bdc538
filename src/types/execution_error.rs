//! Error recorded on an execution or on a single run record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error recorded on an execution (terminal) or on a single node run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionError {
  pub message: String,
  /// Node that raised the error, if known.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub node: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl ExecutionError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      node: None,
      description: None,
    }
  }

  pub fn with_node(mut self, node: impl Into<String>) -> Self {
    self.node = Some(node.into());
    self
  }
}

impl fmt::Display for ExecutionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.node {
      Some(node) => write!(f, "{} (node \"{}\")", self.message, node),
      None => f.write_str(&self.message),
    }
  }
}
