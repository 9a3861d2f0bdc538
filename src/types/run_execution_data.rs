//! The `data` payload of an execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExecutionStackData, NodeExecutionFrame, ResultData};

/// Full run state of an execution: results so far, the pending stack and the wait deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunExecutionData {
  #[serde(default)]
  pub result_data: ResultData,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub execution_data: Option<ExecutionStackData>,
  /// Set while the execution is suspended; resume no earlier than this.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wait_till: Option<DateTime<Utc>>,
}

impl RunExecutionData {
  pub fn head_frame(&self) -> Option<&NodeExecutionFrame> {
    self
      .execution_data
      .as_ref()
      .and_then(|d| d.node_execution_stack.first())
  }
}
