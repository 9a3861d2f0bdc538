//! Execution store: the persistence collaborator the resume path reads from.
//!
//! Stores keep executions in a flattened form ([StoredExecution]) where the run payload is a
//! serialized string; reads with data unflatten it back into [crate::types::RunExecutionData].

mod file;
#[cfg(test)]
mod file_test;
mod memory;
mod stored;

use async_trait::async_trait;

use crate::types::Execution;

pub use file::FileExecutionStore;
pub use memory::InMemoryExecutionStore;
pub use stored::StoredExecution;

/// Failure of the underlying storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("store io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("corrupt execution record: {0}")]
  Corrupt(#[from] serde_json::Error),
}

/// What to load with an execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
  /// Load and unflatten the run payload. Without it, `data` is empty.
  pub include_data: bool,
}

impl FindOptions {
  pub fn with_data() -> Self {
    Self { include_data: true }
  }
}

#[async_trait]
pub trait ExecutionStore: Send + Sync {
  async fn find_single(
    &self,
    execution_id: &str,
    options: FindOptions,
  ) -> Result<Option<Execution>, StoreError>;

  /// Replaces the stored record with `execution`.
  async fn update(&self, execution: &Execution) -> Result<(), StoreError>;

  /// Removes the execution. Returns false if nothing was stored under that id for that workflow.
  async fn hard_delete(&self, workflow_id: &str, execution_id: &str) -> Result<bool, StoreError>;

  /// Fetches an execution with its run payload unflattened.
  async fn fetch_full(&self, execution_id: &str) -> Result<Option<Execution>, StoreError> {
    self.find_single(execution_id, FindOptions::with_data()).await
  }
}
