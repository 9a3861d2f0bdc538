//! Integration tests that drive the HTTP router in-process: a suspended execution is resumed
//! through `/webhook-waiting/...`, persisted by `PersistingEngine`, then read back through the
//! executions API.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use waiting_webhooks::server::{HttpState, WAITING_NOT_FOUND_MESSAGE, router};
use waiting_webhooks::store::{FindOptions, StoreError};
use waiting_webhooks::types::{
  ExecutionMode, ExecutionStackData, NodeExecutionFrame, ResultData, RunExecutionData, TaskData,
  WorkflowNode, WorkflowSnapshot,
};
use waiting_webhooks::{
  AdditionalData, Execution, ExecutionStore, InMemoryExecutionStore, NodeTypeRegistry,
  PersistingEngine, RegistryDescriptorResolver, WaitingWebhooks,
};

fn approval_node() -> WorkflowNode {
  WorkflowNode::new("Approval", "wait")
    .with_webhook_id("hook-approval")
    .with_parameters(json!({
      "httpMethod": "POST",
      "options": { "webhookSuffix": "approve" }
    }))
}

/// Execution `id` parked on the `Approval` wait node, which resumes on `POST .../approve`.
fn suspended(id: &str) -> Execution {
  let started = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
  let mut result_data = ResultData::default();
  result_data
    .run_data
    .insert("Start".to_string(), vec![TaskData::new(started, None)]);
  result_data.run_data.insert(
    "Approval".to_string(),
    vec![TaskData::new(started, Some(json!({ "waiting": true })))],
  );
  result_data.last_node_executed = Some("Approval".to_string());

  Execution {
    id: id.to_string(),
    workflow_id: "wf-approvals".to_string(),
    finished: false,
    mode: ExecutionMode::Trigger,
    started_at: started,
    stopped_at: None,
    data: RunExecutionData {
      result_data,
      execution_data: Some(ExecutionStackData {
        node_execution_stack: vec![NodeExecutionFrame::new(approval_node(), json!({}))],
      }),
      wait_till: Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()),
    },
    workflow_data: WorkflowSnapshot::new("wf-approvals", "Approvals")
      .with_node(WorkflowNode::new("Start", "manualTrigger"))
      .with_node(approval_node())
      .with_main_connection("Start", "Approval"),
  }
}

async fn app_with(executions: &[Execution]) -> (Router, Arc<InMemoryExecutionStore>) {
  let store = Arc::new(InMemoryExecutionStore::new());
  for execution in executions {
    store.insert(execution).await.unwrap();
  }
  let shared: Arc<dyn ExecutionStore> = store.clone();
  let waiting = Arc::new(WaitingWebhooks::new(
    Arc::clone(&shared),
    Arc::new(RegistryDescriptorResolver::new(
      NodeTypeRegistry::with_builtin_types(),
    )),
    Arc::new(PersistingEngine::new(Arc::clone(&shared))),
    AdditionalData::new("http://localhost:5678", "webhook-waiting"),
  ));
  (
    router(HttpState::new(waiting, shared), "/webhook-waiting"),
    store,
  )
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(body)
    .unwrap();
  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

#[tokio::test]
async fn resume_runs_the_engine_and_persists_the_finished_execution() {
  let (app, store) = app_with(&[suspended("E1")]).await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/webhook-waiting/E1/approve?by=ops",
    Body::from(r#"{"approved":true}"#),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["executionId"], "E1");
  assert_eq!(body["resumedNode"], "Approval");
  assert_eq!(body["nextNodes"], json!([]));
  assert_eq!(body["finished"], true);

  let stored = store.fetch_full("E1").await.unwrap().unwrap();
  assert!(stored.finished);
  assert!(stored.stopped_at.is_some());
  assert_eq!(stored.mode, ExecutionMode::Webhook);
  assert!(stored.data.wait_till.is_none());
  let runs = &stored.data.result_data.run_data["Approval"];
  assert_eq!(runs.len(), 1, "placeholder run replaced by the resumed run");
  let output = runs[0].data.as_ref().unwrap();
  assert_eq!(output["body"]["approved"], true);
  assert_eq!(output["query"]["by"], "ops");
}

#[tokio::test]
async fn second_call_after_resume_is_a_conflict() {
  let (app, _) = app_with(&[suspended("E1")]).await;
  let (first, _) = send(&app, Method::POST, "/webhook-waiting/E1/approve", Body::empty()).await;
  assert_eq!(first, StatusCode::OK);

  let (status, body) = send(&app, Method::POST, "/webhook-waiting/E1/approve", Body::empty()).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["message"], "The execution \"E1\" has finished already.");
}

#[tokio::test]
async fn not_found_outcomes_share_one_message() {
  let (app, store) = app_with(&[suspended("E1")]).await;

  for (method, uri) in [
    (Method::POST, "/webhook-waiting/missing/approve"),
    (Method::POST, "/webhook-waiting/E1/reject"),
    (Method::GET, "/webhook-waiting/E1/approve"),
    (Method::POST, "/webhook-waiting/E1"),
  ] {
    let (status, body) = send(&app, method.clone(), uri, Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    assert_eq!(body["message"], WAITING_NOT_FOUND_MESSAGE, "{} {}", method, uri);
  }

  let untouched = store.fetch_full("E1").await.unwrap().unwrap();
  assert_eq!(untouched, suspended("E1"));
}

#[tokio::test]
async fn preflight_is_answered_as_not_found() {
  let (app, _) = app_with(&[suspended("E1")]).await;
  let (status, body) = send(&app, Method::OPTIONS, "/webhook-waiting/E1/approve", Body::empty()).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], WAITING_NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn executions_api_reads_and_deletes() {
  let (app, store) = app_with(&[suspended("E1")]).await;

  let (status, body) = send(&app, Method::GET, "/api/v1/executions/E1", Body::empty()).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["id"], "E1");
  assert_eq!(body["workflowId"], "wf-approvals");
  assert!(body["data"]["resultData"]["runData"].as_object().unwrap().is_empty());

  let (status, body) = send(
    &app,
    Method::GET,
    "/api/v1/executions/E1?includeData=true",
    Body::empty(),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["resultData"]["lastNodeExecuted"], "Approval");

  let (status, body) = send(&app, Method::DELETE, "/api/v1/executions/E1", Body::empty()).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["id"], "E1");
  assert!(store.find_single("E1", FindOptions::default()).await.unwrap().is_none());

  let (status, _) = send(&app, Method::GET, "/api/v1/executions/E1", Body::empty()).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Store whose records disappear between lookup and delete.
struct VanishingStore {
  inner: InMemoryExecutionStore,
}

#[async_trait]
impl ExecutionStore for VanishingStore {
  async fn find_single(
    &self,
    execution_id: &str,
    options: FindOptions,
  ) -> Result<Option<Execution>, StoreError> {
    self.inner.find_single(execution_id, options).await
  }

  async fn update(&self, execution: &Execution) -> Result<(), StoreError> {
    self.inner.update(execution).await
  }

  async fn hard_delete(&self, _workflow_id: &str, _execution_id: &str) -> Result<bool, StoreError> {
    Ok(false)
  }
}

#[tokio::test]
async fn delete_of_record_gone_before_removal_is_not_found() {
  let inner = InMemoryExecutionStore::new();
  inner.insert(&suspended("E1")).await.unwrap();
  let store: Arc<dyn ExecutionStore> = Arc::new(VanishingStore { inner });
  let waiting = Arc::new(WaitingWebhooks::new(
    Arc::clone(&store),
    Arc::new(RegistryDescriptorResolver::new(
      NodeTypeRegistry::with_builtin_types(),
    )),
    Arc::new(PersistingEngine::new(Arc::clone(&store))),
    AdditionalData::new("http://localhost:5678", "webhook-waiting"),
  ));
  let app = router(HttpState::new(waiting, store), "/webhook-waiting");

  let (status, body) = send(&app, Method::DELETE, "/api/v1/executions/E1", Body::empty()).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Not Found");
}
