//! Response the engine hands back for a webhook-triggered run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response payload produced by the engine when a webhook-triggered run completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponseData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<Value>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub headers: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub response_code: Option<u16>,
  /// The engine answered the caller itself; nothing more to send.
  #[serde(default)]
  pub no_webhook_response: bool,
}

impl WebhookResponseData {
  pub fn json(data: Value) -> Self {
    Self {
      data: Some(data),
      ..Self::default()
    }
  }

  pub fn with_response_code(mut self, code: u16) -> Self {
    self.response_code = Some(code);
    self
  }

  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.insert(name.into(), value.into());
    self
  }
}
