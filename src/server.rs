//! HTTP surface: waiting webhooks plus read/delete of single executions.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
  Json, Router,
  body::Bytes,
  extract::{Path, Query, State},
  http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
  response::{IntoResponse, Response},
  routing::{any, get},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::ResumeError;
use crate::store::{ExecutionStore, FindOptions};
use crate::types::{HttpMethod, WaitingWebhookRequest, WebhookResponseData};
use crate::waiting_webhooks::WaitingWebhooks;

/// Body returned for every not-found outcome of a waiting webhook.
pub const WAITING_NOT_FOUND_MESSAGE: &str = "The requested webhook is not registered.";

pub const EXECUTIONS_PATH: &str = "/api/v1/executions/:id";

#[derive(Clone)]
pub struct HttpState {
  pub waiting: Arc<WaitingWebhooks>,
  pub store: Arc<dyn ExecutionStore>,
}

impl HttpState {
  pub fn new(waiting: Arc<WaitingWebhooks>, store: Arc<dyn ExecutionStore>) -> Self {
    Self { waiting, store }
  }
}

/// Builds the router. Waiting webhooks are served under `waiting_prefix` (e.g.
/// `/webhook-waiting`) for every method, with and without a path suffix.
pub fn router(state: HttpState, waiting_prefix: &str) -> Router {
  let prefix = format!("/{}", waiting_prefix.trim_matches('/'));
  Router::new()
    .route(&format!("{}/:execution_id", prefix), any(waiting_webhook))
    .route(
      &format!("{}/:execution_id/*suffix", prefix),
      any(waiting_webhook_with_suffix),
    )
    .route(EXECUTIONS_PATH, get(get_execution).delete(delete_execution))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Serves `router` until Ctrl-C.
pub async fn run_http_server(listener: TcpListener, router: Router) -> std::io::Result<()> {
  axum::serve(listener, router)
    .with_graceful_shutdown(async {
      if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
      }
    })
    .await
}

#[derive(Debug, Serialize)]
struct ErrorResponseBody {
  message: String,
}

fn message(status: StatusCode, msg: impl Into<String>) -> Response {
  (
    status,
    Json(ErrorResponseBody {
      message: msg.into(),
    }),
  )
    .into_response()
}

impl IntoResponse for ResumeError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    match self {
      ResumeError::NotFound(_) => message(status, WAITING_NOT_FOUND_MESSAGE),
      ResumeError::Conflict(msg) => message(status, msg),
      ResumeError::EngineFailure(e) => message(status, e.message),
      ResumeError::Store(e) => {
        error!(error = %e, "execution store failed");
        message(status, "internal server error")
      }
      ResumeError::InvalidWorkflow(e) => {
        error!(error = %e, "stored workflow snapshot is invalid");
        message(status, "internal server error")
      }
    }
  }
}

/// Turns the engine's response payload into the HTTP response.
pub fn webhook_response(data: WebhookResponseData) -> Response {
  if data.no_webhook_response {
    return StatusCode::OK.into_response();
  }
  let status = data
    .response_code
    .and_then(|code| StatusCode::from_u16(code).ok())
    .unwrap_or(StatusCode::OK);
  let mut headers = HeaderMap::new();
  for (name, value) in &data.headers {
    match (
      HeaderName::try_from(name.as_str()),
      HeaderValue::from_str(value),
    ) {
      (Ok(name), Ok(value)) => {
        headers.insert(name, value);
      }
      _ => warn!(header = %name, "dropping invalid response header"),
    }
  }
  let body = data
    .data
    .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
  (status, headers, Json(body)).into_response()
}

async fn waiting_webhook(
  State(state): State<HttpState>,
  method: Method,
  Path(execution_id): Path<String>,
  Query(query): Query<BTreeMap<String, String>>,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  handle_waiting_webhook(state, method, execution_id, String::new(), query, headers, body).await
}

async fn waiting_webhook_with_suffix(
  State(state): State<HttpState>,
  method: Method,
  Path((execution_id, suffix)): Path<(String, String)>,
  Query(query): Query<BTreeMap<String, String>>,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  handle_waiting_webhook(state, method, execution_id, suffix, query, headers, body).await
}

#[allow(clippy::too_many_arguments)]
async fn handle_waiting_webhook(
  state: HttpState,
  method: Method,
  execution_id: String,
  suffix: String,
  query: BTreeMap<String, String>,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  if method == Method::OPTIONS {
    return preflight(&state, &execution_id);
  }
  let Ok(method) = HttpMethod::try_from(&method) else {
    return ResumeError::not_found("unsupported method").into_response();
  };
  let request = WaitingWebhookRequest::new(execution_id, method, suffix)
    .with_query(query)
    .with_headers(headers)
    .with_body(body);
  match state.waiting.execute_webhook(request).await {
    Ok(data) => webhook_response(data),
    Err(e) => e.into_response(),
  }
}

/// CORS preflight. Waiting webhooks enumerate no methods, so every preflight is answered
/// like an unknown webhook.
fn preflight(state: &HttpState, execution_id: &str) -> Response {
  let methods = state.waiting.webhook_methods(execution_id);
  if methods.is_empty() {
    return ResumeError::not_found("no methods enumerable").into_response();
  }
  let allow = methods
    .iter()
    .map(HttpMethod::as_str)
    .collect::<Vec<_>>()
    .join(", ");
  (
    StatusCode::NO_CONTENT,
    [("access-control-allow-methods", allow)],
  )
    .into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetExecutionQuery {
  #[serde(default)]
  include_data: bool,
}

fn store_failure(e: impl std::fmt::Display) -> Response {
  error!(error = %e, "execution store failed");
  message(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

async fn get_execution(
  State(state): State<HttpState>,
  Path(id): Path<String>,
  Query(query): Query<GetExecutionQuery>,
) -> Response {
  let options = FindOptions {
    include_data: query.include_data,
  };
  match state.store.find_single(&id, options).await {
    Ok(Some(execution)) => Json(execution).into_response(),
    Ok(None) => message(StatusCode::NOT_FOUND, "Not Found"),
    Err(e) => store_failure(e),
  }
}

async fn delete_execution(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
  let execution = match state.store.find_single(&id, FindOptions::default()).await {
    Ok(Some(execution)) => execution,
    Ok(None) => return message(StatusCode::NOT_FOUND, "Not Found"),
    Err(e) => return store_failure(e),
  };
  match state.store.hard_delete(&execution.workflow_id, &execution.id).await {
    Ok(true) => Json(execution).into_response(),
    Ok(false) => message(StatusCode::NOT_FOUND, "Not Found"),
    Err(e) => store_failure(e),
  }
}
