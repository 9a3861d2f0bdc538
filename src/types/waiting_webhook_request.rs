//! Inbound waiting-webhook request.

use std::collections::BTreeMap;

use axum::http::HeaderMap;
use bytes::Bytes;

use super::HttpMethod;

/// An inbound callback addressed to `/webhook-waiting/{execution_id}/{suffix}`.
#[derive(Debug, Clone)]
pub struct WaitingWebhookRequest {
  pub execution_id: String,
  pub method: HttpMethod,
  /// Path after the execution id; `""` when absent.
  pub suffix: String,
  pub headers: HeaderMap,
  pub query: BTreeMap<String, String>,
  pub body: Bytes,
}

impl WaitingWebhookRequest {
  pub fn new(
    execution_id: impl Into<String>,
    method: HttpMethod,
    suffix: impl Into<String>,
  ) -> Self {
    Self {
      execution_id: execution_id.into(),
      method,
      suffix: suffix.into(),
      headers: HeaderMap::new(),
      query: BTreeMap::new(),
      body: Bytes::new(),
    }
  }

  pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
    self.body = body.into();
    self
  }

  pub fn with_headers(mut self, headers: HeaderMap) -> Self {
    self.headers = headers;
    self
  }

  pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
    self.query = query;
    self
  }

  /// Body parsed as JSON; non-JSON bodies become a string, empty bodies `null`.
  pub fn body_json(&self) -> serde_json::Value {
    if self.body.is_empty() {
      return serde_json::Value::Null;
    }
    serde_json::from_slice(&self.body).unwrap_or_else(|_| {
      serde_json::Value::String(String::from_utf8_lossy(&self.body).into_owned())
    })
  }
}
