//! Waiting-webhook service: resume a suspended execution from an inbound callback.
//!
//! Flow per request: claim the execution id → locate the suspension point and its restart
//! webhook → prepare the run data → dispatch to the engine and wait for its response.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::context::AdditionalData;
use crate::descriptors::WebhookDescriptorResolver;
use crate::dispatcher::{ExecutionDispatcher, settle};
use crate::engine::{EngineError, WorkflowEngine};
use crate::error::ResumeError;
use crate::locator::{ResumeTarget, ResumptionLocator};
use crate::mutator::prepare_for_resume;
use crate::resume_locks::ResumeLocks;
use crate::store::ExecutionStore;
use crate::types::{HttpMethod, WaitingWebhookRequest, WebhookResponseData};

pub struct WaitingWebhooks {
  locator: ResumptionLocator,
  dispatcher: ExecutionDispatcher,
  locks: ResumeLocks,
}

impl WaitingWebhooks {
  pub fn new(
    store: Arc<dyn ExecutionStore>,
    resolver: Arc<dyn WebhookDescriptorResolver>,
    engine: Arc<dyn WorkflowEngine>,
    context: AdditionalData,
  ) -> Self {
    Self {
      locator: ResumptionLocator::new(store, resolver, Arc::new(context)),
      dispatcher: ExecutionDispatcher::new(engine),
      locks: ResumeLocks::new(),
    }
  }

  pub fn locks(&self) -> &ResumeLocks {
    &self.locks
  }

  /// Methods a waiting webhook answers to, for CORS preflight. Always empty: waiting
  /// executions must not be discoverable through preflight requests.
  pub fn webhook_methods(&self, _path: &str) -> Vec<HttpMethod> {
    Vec::new()
  }

  /// Resumes the execution addressed by `request` and returns the engine's response.
  #[instrument(
    level = "debug",
    skip(self, request),
    fields(execution_id = %request.execution_id, method = %request.method)
  )]
  pub async fn execute_webhook(
    &self,
    request: WaitingWebhookRequest,
  ) -> Result<WebhookResponseData, ResumeError> {
    debug!(
      "Received waiting-webhook \"{}\" for execution \"{}\"",
      request.method, request.execution_id
    );

    let Some(guard) = self.locks.try_acquire(&request.execution_id) else {
      // Only a request that matches the restart webhook learns that a resume is in flight;
      // anything else gets the same not-found as an unknown execution.
      self.locate(&request).await?;
      warn!("execution is already being resumed");
      return Err(ResumeError::conflict(format!(
        "The execution \"{}\" is already being resumed.",
        request.execution_id
      )));
    };

    let mut target = self.locate(&request).await?;
    let last_node = target.start_node.name.clone();
    let resume_url = target.webhook.resume_url(&request.execution_id);
    prepare_for_resume(&mut target.execution.data, &last_node)?;

    let done = self.dispatcher.start(target, request).await;
    // The claim is released when the engine reports, even if the caller went away.
    let received = tokio::spawn(async move {
      let received = done.await;
      drop(guard);
      received
    })
    .await
    .map_err(|e| ResumeError::EngineFailure(EngineError::new(e.to_string())))?;
    let response = settle(received)?;
    info!(node = %last_node, url = %resume_url, "execution resumed");
    Ok(response)
  }

  /// Read-only lookup of the resume target; the not-found reason is only logged.
  async fn locate(&self, request: &WaitingWebhookRequest) -> Result<ResumeTarget, ResumeError> {
    match self.locator.locate(request).await {
      Err(ResumeError::NotFound(reason)) => {
        debug!(%reason, "waiting webhook not found");
        Err(ResumeError::NotFound(reason))
      }
      other => other,
    }
  }
}
