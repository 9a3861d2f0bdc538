//! Errors of a resume attempt.

use axum::http::StatusCode;

use crate::engine::EngineError;
use crate::store::StoreError;
use crate::workflow_graph::GraphError;

/// Why a waiting webhook could not resume its execution.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
  /// Execution absent, suspended node absent, or no matching restart webhook.
  /// All three look the same to the caller.
  #[error("not found: {0}")]
  NotFound(String),
  /// Execution already finished, already failed, or is being resumed right now.
  #[error("conflict: {0}")]
  Conflict(String),
  #[error("engine failure: {0}")]
  EngineFailure(#[from] EngineError),
  #[error(transparent)]
  Store(#[from] StoreError),
  #[error(transparent)]
  InvalidWorkflow(#[from] GraphError),
}

impl ResumeError {
  pub fn not_found(msg: impl Into<String>) -> Self {
    ResumeError::NotFound(msg.into())
  }

  pub fn conflict(msg: impl Into<String>) -> Self {
    ResumeError::Conflict(msg.into())
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      ResumeError::NotFound(_) => StatusCode::NOT_FOUND,
      ResumeError::Conflict(_) => StatusCode::CONFLICT,
      ResumeError::EngineFailure(_) | ResumeError::Store(_) | ResumeError::InvalidWorkflow(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}
