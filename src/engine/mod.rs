//! Interface to the forward graph-execution engine.
//!
//! The engine is started with a [ResumeJob] and a [Completion]. It reports back exactly once
//! through the completion: `Completion` is consumed when fired, and a completion dropped
//! without firing is observed by the waiting side as an engine failure.

mod persisting;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::types::{
  ExecutionMode, RunExecutionData, WaitingWebhookRequest, WebhookDescriptor, WebhookResponseData,
  WorkflowNode, WorkflowSnapshot,
};
use crate::workflow_graph::WorkflowGraph;

pub use persisting::PersistingEngine;

/// Error reported by the engine for a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
  pub message: String,
}

impl EngineError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Result the engine reports for one run.
pub type EngineResult = Result<WebhookResponseData, EngineError>;

/// A resumed run: start at `start_node`, bound to `webhook`, continuing from `seed`.
#[derive(Debug, Clone)]
pub struct ResumeJob {
  pub graph: WorkflowGraph,
  pub webhook: WebhookDescriptor,
  pub workflow_data: WorkflowSnapshot,
  pub start_node: WorkflowNode,
  pub mode: ExecutionMode,
  pub seed: RunExecutionData,
  /// Id of the execution being resumed; the run keeps this identity.
  pub execution_id: String,
  pub request: WaitingWebhookRequest,
}

/// Single-shot completion handle for a run.
#[derive(Debug)]
pub struct Completion {
  tx: oneshot::Sender<EngineResult>,
}

impl Completion {
  /// Creates a completion and the receiver the caller awaits.
  pub fn channel() -> (Self, oneshot::Receiver<EngineResult>) {
    let (tx, rx) = oneshot::channel();
    (Self { tx }, rx)
  }

  pub fn complete(self, result: EngineResult) {
    // The caller may have gone away; the run's outcome is still the engine's to persist.
    let _ = self.tx.send(result);
  }

  pub fn succeed(self, response: WebhookResponseData) {
    self.complete(Ok(response));
  }

  pub fn fail(self, error: EngineError) {
    self.complete(Err(error));
  }

  /// True once the waiting side has dropped its receiver.
  pub fn is_abandoned(&self) -> bool {
    self.tx.is_closed()
  }
}

#[async_trait]
pub trait WorkflowEngine: Send + Sync {
  /// Starts `job`. The engine must eventually fire or drop `completion`; it may do so after
  /// this call returns.
  async fn resume(&self, job: ResumeJob, completion: Completion);
}
