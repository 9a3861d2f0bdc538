//! Process-wide context handed to descriptor resolution and the engine.

use crate::config::ServerConfig;

/// Process-wide execution context (base URLs, instance settings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalData {
  /// Public base URL of this instance, without trailing `/`.
  pub instance_base_url: String,
  /// Base URL under which waiting webhooks are served.
  pub webhook_waiting_base_url: String,
}

impl AdditionalData {
  pub fn new(instance_base_url: &str, waiting_path: &str) -> Self {
    let instance_base_url = instance_base_url.trim_end_matches('/').to_string();
    let webhook_waiting_base_url = format!(
      "{}/{}",
      instance_base_url,
      waiting_path.trim_matches('/')
    );
    Self {
      instance_base_url,
      webhook_waiting_base_url,
    }
  }

  pub fn base(config: &ServerConfig) -> Self {
    Self::new(&config.base_url, &config.waiting_path)
  }
}
