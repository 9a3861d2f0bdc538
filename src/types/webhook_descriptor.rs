//! Webhook trigger descriptors exposed by workflow nodes.

use serde::{Deserialize, Serialize};

use super::HttpMethod;

/// Strips leading and trailing `/` so `"/x/"`, `"x"` and `"x/"` compare equal. `""` stays `""`.
pub fn normalize_webhook_path(path: &str) -> &str {
  path.trim_matches('/')
}

/// One webhook a node listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDescriptor {
  pub http_method: HttpMethod,
  /// Path below the webhook prefix; `""` means no further segments.
  pub path: String,
  /// Name of the owning node.
  pub node: String,
  pub workflow_id: String,
  /// Name of the webhook description on the node type (e.g. `default`, `resume`).
  pub name: String,
  /// True if this webhook resumes a suspended execution rather than starting a new one.
  pub restart_webhook: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub webhook_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub response_mode: Option<String>,
  /// Base URL of waiting webhooks, e.g. `http://localhost:5678/webhook-waiting`.
  #[serde(default)]
  pub waiting_base_url: String,
}

impl WebhookDescriptor {
  /// True if this is a restart webhook registered for `method` at `suffix`.
  pub fn matches_resume(&self, method: HttpMethod, suffix: &str) -> bool {
    self.restart_webhook
      && self.http_method == method
      && normalize_webhook_path(&self.path) == normalize_webhook_path(suffix)
  }

  /// URL a caller must hit to resume `execution_id` through this webhook.
  pub fn resume_url(&self, execution_id: &str) -> String {
    let base = self.waiting_base_url.trim_end_matches('/');
    match normalize_webhook_path(&self.path) {
      "" => format!("{}/{}", base, execution_id),
      path => format!("{}/{}/{}", base, execution_id, path),
    }
  }
}
