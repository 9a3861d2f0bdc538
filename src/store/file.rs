//! Execution store keeping one JSON file per execution in a directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{instrument, warn};

use super::{ExecutionStore, FindOptions, StoreError, StoredExecution};
use crate::types::Execution;

/// Execution ids used as file names may only contain ASCII alphanumerics, `-` and `_`.
pub(crate) fn is_safe_execution_id(id: &str) -> bool {
  !id.is_empty()
    && id
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Stores each execution as `<dir>/<execution id>.json`.
#[derive(Debug, Clone)]
pub struct FileExecutionStore {
  dir: PathBuf,
}

impl FileExecutionStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, execution_id: &str) -> Option<PathBuf> {
    is_safe_execution_id(execution_id).then(|| self.dir.join(format!("{}.json", execution_id)))
  }

  async fn read(&self, execution_id: &str) -> Result<Option<StoredExecution>, StoreError> {
    let Some(path) = self.path_for(execution_id) else {
      return Ok(None);
    };
    match tokio::fs::read(&path).await {
      Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

#[async_trait]
impl ExecutionStore for FileExecutionStore {
  #[instrument(level = "trace", skip(self))]
  async fn find_single(
    &self,
    execution_id: &str,
    options: FindOptions,
  ) -> Result<Option<Execution>, StoreError> {
    self
      .read(execution_id)
      .await?
      .map(|stored| stored.unflatten(options))
      .transpose()
  }

  #[instrument(level = "trace", skip(self, execution), fields(execution_id = %execution.id))]
  async fn update(&self, execution: &Execution) -> Result<(), StoreError> {
    let Some(path) = self.path_for(&execution.id) else {
      warn!(execution_id = %execution.id, "refusing to store execution with unsafe id");
      return Err(StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("invalid execution id: {}", execution.id),
      )));
    };
    let json = serde_json::to_string_pretty(&StoredExecution::flatten(execution)?)?;
    tokio::fs::create_dir_all(&self.dir).await?;
    tokio::fs::write(path, json).await?;
    Ok(())
  }

  #[instrument(level = "trace", skip(self))]
  async fn hard_delete(&self, workflow_id: &str, execution_id: &str) -> Result<bool, StoreError> {
    match self.read(execution_id).await? {
      Some(stored) if stored.workflow_id == workflow_id => {
        if let Some(path) = self.path_for(execution_id) {
          tokio::fs::remove_file(path).await?;
        }
        Ok(true)
      }
      _ => Ok(false),
    }
  }
}
