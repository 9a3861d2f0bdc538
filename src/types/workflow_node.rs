//! A node as stored in a workflow snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn empty_parameters() -> Value {
  Value::Object(Default::default())
}

fn default_type_version() -> f64 {
  1.0
}

fn is_false(b: &bool) -> bool {
  !*b
}

/// A node as stored in a workflow snapshot. `name` is the node identifier within its workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
  pub name: String,
  #[serde(rename = "type")]
  pub node_type: String,
  #[serde(default = "default_type_version")]
  pub type_version: f64,
  #[serde(default = "empty_parameters")]
  pub parameters: Value,
  #[serde(default, skip_serializing_if = "is_false")]
  pub disabled: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub webhook_id: Option<String>,
}

impl WorkflowNode {
  pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      node_type: node_type.into(),
      type_version: default_type_version(),
      parameters: empty_parameters(),
      disabled: false,
      webhook_id: None,
    }
  }

  pub fn with_parameters(mut self, parameters: Value) -> Self {
    self.parameters = parameters;
    self
  }

  pub fn with_webhook_id(mut self, webhook_id: impl Into<String>) -> Self {
    self.webhook_id = Some(webhook_id.into());
    self
  }

  /// Looks up a parameter by a dot-separated path (e.g. `options.webhookSuffix`).
  pub fn parameter(&self, path: &str) -> Option<&Value> {
    path
      .split('.')
      .try_fold(&self.parameters, |value, key| value.get(key))
  }
}
