//! One recorded run of a node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ExecutionError;

/// One recorded invocation (input/output) of a node. A node accumulates one per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
  pub start_time: DateTime<Utc>,
  /// Wall time of the run in milliseconds.
  #[serde(default)]
  pub execution_time: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<ExecutionError>,
}

impl TaskData {
  pub fn new(start_time: DateTime<Utc>, data: Option<Value>) -> Self {
    Self {
      start_time,
      execution_time: 0,
      data,
      error: None,
    }
  }
}
