//! Webhook descriptor resolution.
//!
//! Node types declare the webhooks they listen on ([WebhookDescription]); resolving them for a
//! concrete node evaluates method and path against the node's parameters.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::context::AdditionalData;
use crate::types::{HttpMethod, WebhookDescriptor, WorkflowNode};
use crate::workflow_graph::WorkflowGraph;

/// Returns the webhooks a node exposes.
#[async_trait]
pub trait WebhookDescriptorResolver: Send + Sync {
  async fn descriptors_for(
    &self,
    graph: &WorkflowGraph,
    node: &WorkflowNode,
    context: &AdditionalData,
  ) -> Vec<WebhookDescriptor>;
}

/// A webhook property: a literal, or a node parameter with a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
  Literal(String),
  Parameter { path: String, default: String },
}

impl ParameterValue {
  pub fn literal(value: impl Into<String>) -> Self {
    ParameterValue::Literal(value.into())
  }

  /// References node parameter `path` (dot-separated), falling back to `default`.
  pub fn parameter(path: impl Into<String>, default: impl Into<String>) -> Self {
    ParameterValue::Parameter {
      path: path.into(),
      default: default.into(),
    }
  }

  /// Evaluates against `node`. Non-string or empty parameter values yield the default.
  pub fn resolve(&self, node: &WorkflowNode) -> String {
    match self {
      ParameterValue::Literal(v) => v.clone(),
      ParameterValue::Parameter { path, default } => match node.parameter(path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => default.clone(),
      },
    }
  }
}

/// A webhook declared by a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDescription {
  pub name: String,
  pub http_method: ParameterValue,
  pub path: ParameterValue,
  pub restart_webhook: bool,
  pub response_mode: Option<String>,
}

impl WebhookDescription {
  pub fn new(
    name: impl Into<String>,
    http_method: ParameterValue,
    path: ParameterValue,
    restart_webhook: bool,
  ) -> Self {
    Self {
      name: name.into(),
      http_method,
      path,
      restart_webhook,
      response_mode: None,
    }
  }

  pub fn with_response_mode(mut self, mode: impl Into<String>) -> Self {
    self.response_mode = Some(mode.into());
    self
  }
}

/// What the registry knows about one node type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTypeDescription {
  pub webhooks: Vec<WebhookDescription>,
}

impl NodeTypeDescription {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_webhook(mut self, webhook: WebhookDescription) -> Self {
    self.webhooks.push(webhook);
    self
  }
}

/// Node type name → description.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
  types: HashMap<String, NodeTypeDescription>,
}

impl NodeTypeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, node_type: impl Into<String>, description: NodeTypeDescription) {
    self.types.insert(node_type.into(), description);
  }

  pub fn get(&self, node_type: &str) -> Option<&NodeTypeDescription> {
    self.types.get(node_type)
  }

  /// Registry with the built-in `wait` node: a restart webhook whose method comes from the
  /// `httpMethod` parameter (default GET) and whose path comes from `options.webhookSuffix`.
  pub fn with_builtin_types() -> Self {
    let mut registry = Self::new();
    registry.register(
      "wait",
      NodeTypeDescription::new().with_webhook(
        WebhookDescription::new(
          "default",
          ParameterValue::parameter("httpMethod", "GET"),
          ParameterValue::parameter("options.webhookSuffix", ""),
          true,
        )
        .with_response_mode("onReceived"),
      ),
    );
    registry
  }
}

/// Evaluates node-type webhook descriptions from a [NodeTypeRegistry].
#[derive(Debug, Clone, Default)]
pub struct RegistryDescriptorResolver {
  registry: NodeTypeRegistry,
}

impl RegistryDescriptorResolver {
  pub fn new(registry: NodeTypeRegistry) -> Self {
    Self { registry }
  }

  /// Synchronous core of [WebhookDescriptorResolver::descriptors_for].
  pub fn resolve(
    &self,
    graph: &WorkflowGraph,
    node: &WorkflowNode,
    context: &AdditionalData,
  ) -> Vec<WebhookDescriptor> {
    if node.disabled {
      return Vec::new();
    }
    let Some(description) = self.registry.get(&node.node_type) else {
      return Vec::new();
    };

    description
      .webhooks
      .iter()
      .filter_map(|webhook| {
        let raw_method = webhook.http_method.resolve(node);
        let http_method = match raw_method.parse::<HttpMethod>() {
          Ok(m) => m,
          Err(e) => {
            warn!(node = %node.name, webhook = %webhook.name, error = %e, "skipping webhook");
            return None;
          }
        };
        Some(WebhookDescriptor {
          http_method,
          path: webhook.path.resolve(node),
          node: node.name.clone(),
          workflow_id: graph.id.clone(),
          name: webhook.name.clone(),
          restart_webhook: webhook.restart_webhook,
          webhook_id: node.webhook_id.clone(),
          response_mode: webhook.response_mode.clone(),
          waiting_base_url: context.webhook_waiting_base_url.clone(),
        })
      })
      .collect()
  }
}

#[async_trait]
impl WebhookDescriptorResolver for RegistryDescriptorResolver {
  #[instrument(level = "trace", skip(self, graph, node, context), fields(node = %node.name))]
  async fn descriptors_for(
    &self,
    graph: &WorkflowGraph,
    node: &WorkflowNode,
    context: &AdditionalData,
  ) -> Vec<WebhookDescriptor> {
    self.resolve(graph, node, context)
  }
}
