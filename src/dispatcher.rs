//! Hands a located, prepared execution to the engine and interprets its completion.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{error, instrument};

use crate::engine::{Completion, EngineError, EngineResult, ResumeJob, WorkflowEngine};
use crate::error::ResumeError;
use crate::locator::ResumeTarget;
use crate::types::{ExecutionMode, WaitingWebhookRequest, WebhookResponseData};

pub const ENGINE_STOPPED_MESSAGE: &str = "The workflow engine stopped without reporting a result.";

#[derive(Clone)]
pub struct ExecutionDispatcher {
  engine: Arc<dyn WorkflowEngine>,
}

impl ExecutionDispatcher {
  pub fn new(engine: Arc<dyn WorkflowEngine>) -> Self {
    Self { engine }
  }

  /// Starts the engine at `target.start_node` with the (already prepared) execution data as
  /// seed. Returns the receiver of the engine's single completion; pass what it yields to
  /// [settle]. One attempt, no retries.
  #[instrument(
    level = "debug",
    skip(self, target, request),
    fields(execution_id = %target.execution.id, node = %target.start_node.name)
  )]
  pub async fn start(
    &self,
    target: ResumeTarget,
    request: WaitingWebhookRequest,
  ) -> oneshot::Receiver<EngineResult> {
    let ResumeTarget {
      execution,
      graph,
      start_node,
      webhook,
    } = target;

    let job = ResumeJob {
      graph,
      webhook,
      workflow_data: execution.workflow_data,
      start_node,
      mode: ExecutionMode::Webhook,
      seed: execution.data,
      execution_id: execution.id,
      request,
    };

    let (completion, done) = Completion::channel();
    self.engine.resume(job, completion).await;
    done
  }
}

/// Maps what the completion receiver yielded to the resume outcome. A completion dropped
/// without firing is an engine failure.
pub fn settle(
  received: Result<EngineResult, oneshot::error::RecvError>,
) -> Result<WebhookResponseData, ResumeError> {
  match received {
    Ok(Ok(response)) => Ok(response),
    Ok(Err(e)) => {
      error!(error = %e, "engine reported failure");
      Err(ResumeError::EngineFailure(e))
    }
    Err(_) => {
      error!("engine dropped the completion without reporting");
      Err(ResumeError::EngineFailure(EngineError::new(
        ENGINE_STOPPED_MESSAGE,
      )))
    }
  }
}
