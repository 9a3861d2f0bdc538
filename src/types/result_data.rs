//! Results recorded so far by an execution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ExecutionError, TaskData};

/// Run records per node, plus the last executed node and any terminal error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
  #[serde(default)]
  pub run_data: BTreeMap<String, Vec<TaskData>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_node_executed: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<ExecutionError>,
}

impl ResultData {
  /// Number of recorded runs for `node`.
  pub fn run_count(&self, node: &str) -> usize {
    self.run_data.get(node).map(Vec::len).unwrap_or(0)
  }
}
