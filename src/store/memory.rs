//! In-process execution store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use super::{ExecutionStore, FindOptions, StoreError, StoredExecution};
use crate::types::Execution;

/// Execution store backed by a map. Records are kept flattened, like a real database row.
#[derive(Debug, Default)]
pub struct InMemoryExecutionStore {
  executions: RwLock<HashMap<String, StoredExecution>>,
}

impl InMemoryExecutionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts or replaces `execution`.
  pub async fn insert(&self, execution: &Execution) -> Result<(), StoreError> {
    let stored = StoredExecution::flatten(execution)?;
    self
      .executions
      .write()
      .await
      .insert(stored.id.clone(), stored);
    Ok(())
  }

  pub async fn len(&self) -> usize {
    self.executions.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.executions.read().await.is_empty()
  }
}

#[async_trait]
impl ExecutionStore for InMemoryExecutionStore {
  #[instrument(level = "trace", skip(self))]
  async fn find_single(
    &self,
    execution_id: &str,
    options: FindOptions,
  ) -> Result<Option<Execution>, StoreError> {
    let executions = self.executions.read().await;
    executions
      .get(execution_id)
      .map(|stored| stored.unflatten(options))
      .transpose()
  }

  #[instrument(level = "trace", skip(self, execution), fields(execution_id = %execution.id))]
  async fn update(&self, execution: &Execution) -> Result<(), StoreError> {
    self.insert(execution).await
  }

  #[instrument(level = "trace", skip(self))]
  async fn hard_delete(&self, workflow_id: &str, execution_id: &str) -> Result<bool, StoreError> {
    let mut executions = self.executions.write().await;
    match executions.get(execution_id) {
      Some(stored) if stored.workflow_id == workflow_id => {
        executions.remove(execution_id);
        Ok(true)
      }
      _ => Ok(false),
    }
  }
}
