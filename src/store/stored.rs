//! Flattened storage form of an execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FindOptions, StoreError};
use crate::types::{Execution, ExecutionMode, RunExecutionData, WorkflowSnapshot};

/// An execution as stored: the run payload is kept serialized in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExecution {
  pub id: String,
  pub workflow_id: String,
  pub finished: bool,
  pub mode: ExecutionMode,
  pub started_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stopped_at: Option<DateTime<Utc>>,
  /// Serialized [RunExecutionData].
  pub data: String,
  pub workflow_data: WorkflowSnapshot,
}

impl StoredExecution {
  pub fn flatten(execution: &Execution) -> Result<Self, StoreError> {
    Ok(Self {
      id: execution.id.clone(),
      workflow_id: execution.workflow_id.clone(),
      finished: execution.finished,
      mode: execution.mode,
      started_at: execution.started_at,
      stopped_at: execution.stopped_at,
      data: serde_json::to_string(&execution.data)?,
      workflow_data: execution.workflow_data.clone(),
    })
  }

  /// Rebuilds the execution; the run payload is parsed only when `options.include_data`.
  pub fn unflatten(&self, options: FindOptions) -> Result<Execution, StoreError> {
    let data = if options.include_data {
      serde_json::from_str::<RunExecutionData>(&self.data)?
    } else {
      RunExecutionData::default()
    };
    Ok(Execution {
      id: self.id.clone(),
      workflow_id: self.workflow_id.clone(),
      finished: self.finished,
      mode: self.mode,
      started_at: self.started_at,
      stopped_at: self.stopped_at,
      data,
      workflow_data: self.workflow_data.clone(),
    })
  }
}
