//! CLI: serve waiting webhooks that resume suspended executions.
//!
//! Usage: `waiting_webhook_server [OPTIONS]`
//! Example: waiting_webhook_server --store-dir .executions --listen 0.0.0.0:5678
//!
//! Set RUST_LOG=waiting_webhooks=debug for per-request resume tracing.

use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use waiting_webhooks::descriptors::{NodeTypeRegistry, RegistryDescriptorResolver};
use waiting_webhooks::server::{HttpState, router, run_http_server};
use waiting_webhooks::{AdditionalData, PersistingEngine, ServerConfig, WaitingWebhooks};

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = match ServerConfig::parse().with_env_overrides(|k| std::env::var(k).ok()) {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      process::exit(1);
    }
  };
  info!(listen = %config.listen, store_dir = ?config.store_dir, base_url = %config.base_url, "options (env or flags)");

  let store = config.open_store();
  let waiting = Arc::new(WaitingWebhooks::new(
    Arc::clone(&store),
    Arc::new(RegistryDescriptorResolver::new(
      NodeTypeRegistry::with_builtin_types(),
    )),
    Arc::new(PersistingEngine::new(Arc::clone(&store))),
    AdditionalData::base(&config),
  ));
  let app = router(HttpState::new(waiting, store), &config.waiting_route_prefix());

  let listener = match TcpListener::bind(config.listen).await {
    Ok(l) => l,
    Err(e) => {
      eprintln!("Error binding {}: {}", config.listen, e);
      process::exit(1);
    }
  };
  info!(prefix = %config.waiting_route_prefix(), "serving waiting webhooks");
  if let Err(e) = run_http_server(listener, app).await {
    error!(error = %e, "server stopped");
    process::exit(1);
  }
}
