//! Server configuration: command-line flags, overridden by environment variables when set.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crate::store::{ExecutionStore, FileExecutionStore, InMemoryExecutionStore};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5678";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";
pub const DEFAULT_WAITING_PATH: &str = "webhook-waiting";

pub const ENV_LISTEN: &str = "WAITING_WEBHOOKS_LISTEN";
pub const ENV_STORE_DIR: &str = "WAITING_WEBHOOKS_STORE_DIR";
pub const ENV_BASE_URL: &str = "WAITING_WEBHOOKS_BASE_URL";
pub const ENV_WAITING_PATH: &str = "WAITING_WEBHOOKS_PATH";

/// Serve waiting webhooks that resume suspended workflow executions.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "waiting_webhook_server")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  WAITING_WEBHOOKS_LISTEN     Address to listen on.
  WAITING_WEBHOOKS_STORE_DIR  Directory of <execution id>.json records. Unset: in-memory store.
  WAITING_WEBHOOKS_BASE_URL   Public base URL used in resume URLs.
  WAITING_WEBHOOKS_PATH       Path prefix of waiting webhooks.

Set RUST_LOG=waiting_webhooks=debug to trace each resume attempt."#
)]
pub struct ServerConfig {
  /// Address to listen on.
  #[arg(long, value_name = "ADDR", default_value = DEFAULT_LISTEN)]
  pub listen: SocketAddr,

  /// Directory of stored executions. Without it executions live in memory.
  #[arg(long, value_name = "DIR")]
  pub store_dir: Option<PathBuf>,

  /// Public base URL of this instance.
  #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
  pub base_url: String,

  /// Path prefix under which waiting webhooks are served.
  #[arg(long, value_name = "PATH", default_value = DEFAULT_WAITING_PATH)]
  pub waiting_path: String,
}

/// Environment value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value}")]
pub struct ConfigError {
  pub var: &'static str,
  pub value: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      listen: DEFAULT_LISTEN
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 5678))),
      store_dir: None,
      base_url: DEFAULT_BASE_URL.to_string(),
      waiting_path: DEFAULT_WAITING_PATH.to_string(),
    }
  }
}

impl ServerConfig {
  /// Applies environment overrides read through `lookup` (normally `std::env::var`).
  pub fn with_env_overrides(
    mut self,
    lookup: impl Fn(&str) -> Option<String>,
  ) -> Result<Self, ConfigError> {
    if let Some(listen) = lookup(ENV_LISTEN) {
      self.listen = listen.parse().map_err(|_| ConfigError {
        var: ENV_LISTEN,
        value: listen.clone(),
      })?;
    }
    if let Some(dir) = lookup(ENV_STORE_DIR) {
      self.store_dir = Some(PathBuf::from(dir));
    }
    if let Some(url) = lookup(ENV_BASE_URL) {
      self.base_url = url;
    }
    if let Some(path) = lookup(ENV_WAITING_PATH) {
      self.waiting_path = path;
    }
    Ok(self)
  }

  /// Route prefix of waiting webhooks, e.g. `/webhook-waiting`.
  pub fn waiting_route_prefix(&self) -> String {
    format!("/{}", self.waiting_path.trim_matches('/'))
  }

  /// Opens the configured execution store: the file store under `store_dir`, or an empty
  /// in-memory store when no directory is set.
  pub fn open_store(&self) -> Arc<dyn ExecutionStore> {
    match &self.store_dir {
      Some(dir) => {
        info!(dir = %dir.display(), "using file execution store");
        Arc::new(FileExecutionStore::new(dir))
      }
      None => {
        warn!(
          "no store directory configured (--store-dir or {}); executions live in an empty \
           in-memory store and every waiting webhook will answer not found",
          ENV_STORE_DIR
        );
        Arc::new(InMemoryExecutionStore::new())
      }
    }
  }
}
