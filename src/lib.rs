//! # waiting-webhooks
//!
//! Resumes suspended workflow executions when their waiting webhook is called.
//!
//! ## Architecture
//!
//! A request to `/webhook-waiting/{execution_id}/{suffix}` goes through:
//!
//! - [resume_locks]: at most one in-flight resume per execution id.
//! - [locator]: fetch the execution, rebuild its [workflow_graph] from the stored snapshot,
//!   find the suspended node and the restart webhook matching method and path.
//! - [mutator]: disable the stack head, clear `waitTill`, drop the placeholder run.
//! - [dispatcher]: start the [engine] at the suspended node and await its single completion.
//!
//! Storage ([store]), descriptor resolution ([descriptors]) and the engine are traits; the
//! crate ships in-memory and file stores, a registry-backed resolver and a minimal engine.

pub mod config;
pub mod context;
pub mod descriptors;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod locator;
pub mod mutator;
pub mod resume_locks;
pub mod server;
pub mod store;
#[cfg(test)]
mod test_fixtures;
pub mod types;
pub mod waiting_webhooks;
pub mod workflow_graph;

pub use config::ServerConfig;
pub use context::AdditionalData;
pub use descriptors::{NodeTypeRegistry, RegistryDescriptorResolver, WebhookDescriptorResolver};
pub use engine::{Completion, EngineError, PersistingEngine, ResumeJob, WorkflowEngine};
pub use error::ResumeError;
pub use store::{ExecutionStore, FileExecutionStore, InMemoryExecutionStore};
pub use types::{Execution, WaitingWebhookRequest, WebhookDescriptor, WebhookResponseData};
pub use waiting_webhooks::WaitingWebhooks;
pub use workflow_graph::WorkflowGraph;
