//! Finds the node an execution is parked on and checks the request is its restart webhook.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::context::AdditionalData;
use crate::descriptors::WebhookDescriptorResolver;
use crate::error::ResumeError;
use crate::store::ExecutionStore;
use crate::types::{Execution, HttpMethod, WaitingWebhookRequest, WebhookDescriptor, WorkflowNode};
use crate::workflow_graph::WorkflowGraph;

/// Everything needed to re-enter an execution at its suspension point.
#[derive(Debug, Clone)]
pub struct ResumeTarget {
  /// Private copy of the stored execution, fetched with data.
  pub execution: Execution,
  pub graph: WorkflowGraph,
  pub start_node: WorkflowNode,
  pub webhook: WebhookDescriptor,
}

/// Picks the restart webhook registered for `method` at `suffix`.
pub fn select_restart_webhook(
  descriptors: Vec<WebhookDescriptor>,
  method: HttpMethod,
  suffix: &str,
) -> Option<WebhookDescriptor> {
  descriptors
    .into_iter()
    .find(|d| d.matches_resume(method, suffix))
}

pub struct ResumptionLocator {
  store: Arc<dyn ExecutionStore>,
  resolver: Arc<dyn WebhookDescriptorResolver>,
  context: Arc<AdditionalData>,
}

impl ResumptionLocator {
  pub fn new(
    store: Arc<dyn ExecutionStore>,
    resolver: Arc<dyn WebhookDescriptorResolver>,
    context: Arc<AdditionalData>,
  ) -> Self {
    Self {
      store,
      resolver,
      context,
    }
  }

  /// Resolves `request` to its [ResumeTarget].
  ///
  /// Fails with [ResumeError::NotFound] when the execution, its suspended node, or a matching
  /// restart webhook is missing, and with [ResumeError::Conflict] when the execution already
  /// terminated.
  #[instrument(
    level = "debug",
    skip(self, request),
    fields(execution_id = %request.execution_id, method = %request.method, suffix = %request.suffix)
  )]
  pub async fn locate(&self, request: &WaitingWebhookRequest) -> Result<ResumeTarget, ResumeError> {
    let execution_id = request.execution_id.as_str();
    let execution = self
      .store
      .fetch_full(execution_id)
      .await?
      .ok_or_else(|| {
        ResumeError::not_found(format!("The execution \"{}\" does not exist.", execution_id))
      })?;

    if execution.has_terminated() {
      return Err(ResumeError::conflict(format!(
        "The execution \"{}\" has finished already.",
        execution_id
      )));
    }

    let last_node = execution
      .last_node_executed()
      .ok_or_else(|| ResumeError::not_found("Could not find node to process webhook."))?
      .to_string();

    let graph = WorkflowGraph::build(&execution.workflow_data)?;

    let start_node = graph
      .node(&last_node)
      .cloned()
      .ok_or_else(|| ResumeError::not_found("Could not find node to process webhook."))?;

    let descriptors = self
      .resolver
      .descriptors_for(&graph, &start_node, &self.context)
      .await;
    debug!(node = %last_node, count = descriptors.len(), "resolved node webhooks");

    let webhook = select_restart_webhook(descriptors, request.method, &request.suffix)
      .ok_or_else(|| {
        ResumeError::not_found(format!(
          "The workflow for execution \"{}\" does not contain a waiting webhook with a matching path/method.",
          execution_id
        ))
      })?;

    Ok(ResumeTarget {
      execution,
      graph,
      start_node,
      webhook,
    })
  }
}
