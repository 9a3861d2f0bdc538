//! Persisted execution and workflow types, plus the webhook request/response types
//! exchanged with the engine.

mod connections;
mod execution;
mod execution_error;
mod execution_mode;
#[cfg(test)]
mod execution_test;
mod http_method;
mod node_execution_frame;
mod result_data;
mod run_execution_data;
mod task_data;
mod waiting_webhook_request;
mod webhook_descriptor;
mod webhook_response;
mod workflow_node;
mod workflow_snapshot;

pub use connections::{ConnectionTarget, Connections, NodeConnections};
pub use execution::Execution;
pub use execution_error::ExecutionError;
pub use execution_mode::ExecutionMode;
pub use http_method::{HttpMethod, UnknownHttpMethod};
pub use node_execution_frame::{ExecutionStackData, NodeExecutionFrame};
pub use result_data::ResultData;
pub use run_execution_data::RunExecutionData;
pub use task_data::TaskData;
pub use waiting_webhook_request::WaitingWebhookRequest;
pub use webhook_descriptor::{WebhookDescriptor, normalize_webhook_path};
pub use webhook_response::WebhookResponseData;
pub use workflow_node::WorkflowNode;
pub use workflow_snapshot::WorkflowSnapshot;
