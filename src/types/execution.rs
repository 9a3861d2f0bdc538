//! A persisted workflow execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExecutionMode, RunExecutionData, WorkflowSnapshot};

/// A persisted workflow execution with its run payload and workflow snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
  pub id: String,
  pub workflow_id: String,
  #[serde(default)]
  pub finished: bool,
  #[serde(default)]
  pub mode: ExecutionMode,
  pub started_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stopped_at: Option<DateTime<Utc>>,
  /// Empty when fetched without data.
  #[serde(default)]
  pub data: RunExecutionData,
  pub workflow_data: WorkflowSnapshot,
}

impl Execution {
  /// True if the execution finished or stopped with an error. Such executions cannot resume.
  pub fn has_terminated(&self) -> bool {
    self.finished || self.data.result_data.error.is_some()
  }

  /// Node the execution is parked on, if any.
  pub fn last_node_executed(&self) -> Option<&str> {
    self.data.result_data.last_node_executed.as_deref()
  }
}
