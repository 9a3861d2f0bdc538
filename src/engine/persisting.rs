//! Minimal engine that records the resumed node's run and writes the execution back.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use super::{Completion, EngineError, EngineResult, ResumeJob, WorkflowEngine};
use crate::store::{ExecutionStore, FindOptions};
use crate::types::{RunExecutionData, TaskData, WebhookResponseData};

/// Applies one resumed run of `job.start_node` to the seed data.
///
/// The webhook request (body, query) becomes the node's output, the disabled head frame is
/// consumed, and the start node becomes the last executed node.
pub(crate) fn advance(job: &ResumeJob, now: DateTime<Utc>) -> RunExecutionData {
  let mut data = job.seed.clone();
  if let Some(stack) = data.execution_data.as_mut() {
    if !stack.node_execution_stack.is_empty() {
      stack.node_execution_stack.remove(0);
    }
  }
  let output = json!({
    "body": job.request.body_json(),
    "query": job.request.query,
    "webhook": job.webhook.name,
  });
  data
    .result_data
    .run_data
    .entry(job.start_node.name.clone())
    .or_default()
    .push(TaskData::new(now, Some(output)));
  data.result_data.last_node_executed = Some(job.start_node.name.clone());
  data
}

/// Reference [WorkflowEngine]: records one run for the start node, finishes the execution when
/// nothing else is pending, persists through the store and acknowledges with JSON naming the
/// nodes connected downstream of the resumed node.
///
/// It does not execute downstream nodes.
pub struct PersistingEngine {
  store: Arc<dyn ExecutionStore>,
}

impl PersistingEngine {
  pub fn new(store: Arc<dyn ExecutionStore>) -> Self {
    Self { store }
  }

  #[instrument(level = "debug", skip(store, job), fields(execution_id = %job.execution_id, node = %job.start_node.name))]
  async fn run(store: Arc<dyn ExecutionStore>, job: ResumeJob) -> EngineResult {
    let mut execution = store
      .find_single(&job.execution_id, FindOptions::default())
      .await
      .map_err(|e| EngineError::new(e.to_string()))?
      .ok_or_else(|| EngineError::new(format!("execution \"{}\" vanished", job.execution_id)))?;

    let now = Utc::now();
    execution.mode = job.mode;
    execution.data = advance(&job, now);
    let pending = execution
      .data
      .execution_data
      .as_ref()
      .map(|d| d.node_execution_stack.len())
      .unwrap_or(0);
    if pending == 0 {
      execution.finished = true;
      execution.stopped_at = Some(now);
    }

    store
      .update(&execution)
      .await
      .map_err(|e| EngineError::new(e.to_string()))?;
    info!(finished = execution.finished, pending, "resumed execution persisted");

    Ok(WebhookResponseData::json(json!({
      "executionId": execution.id,
      "resumedNode": job.start_node.name,
      "nextNodes": job.graph.child_nodes(&job.start_node.name),
      "finished": execution.finished,
    })))
  }
}

#[async_trait]
impl WorkflowEngine for PersistingEngine {
  async fn resume(&self, job: ResumeJob, completion: Completion) {
    let store = Arc::clone(&self.store);
    tokio::spawn(async move {
      let result = Self::run(store, job).await;
      if completion.is_abandoned() {
        debug!("caller went away before the resumed run completed");
      }
      if let Err(e) = &result {
        error!(error = %e, "resumed run failed");
      }
      completion.complete(result);
    });
  }
}
