//! How an execution was started.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an execution was started. Resumed executions always run as [ExecutionMode::Webhook].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
  #[default]
  Manual,
  Trigger,
  Webhook,
  Retry,
  Internal,
}

impl fmt::Display for ExecutionMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExecutionMode::Manual => write!(f, "manual"),
      ExecutionMode::Trigger => write!(f, "trigger"),
      ExecutionMode::Webhook => write!(f, "webhook"),
      ExecutionMode::Retry => write!(f, "retry"),
      ExecutionMode::Internal => write!(f, "internal"),
    }
  }
}
