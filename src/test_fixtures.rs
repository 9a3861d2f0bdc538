//! Shared fixtures for unit tests: an execution parked on a `Wait` node.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::descriptors::{NodeTypeDescription, NodeTypeRegistry, ParameterValue, WebhookDescription};
use crate::types::{
  Execution, ExecutionMode, ExecutionStackData, NodeExecutionFrame, ResultData, RunExecutionData,
  TaskData, WorkflowNode, WorkflowSnapshot,
};

pub(crate) const WAIT_TYPE: &str = "wait";

pub(crate) fn wait_node() -> WorkflowNode {
  WorkflowNode::new("Wait", WAIT_TYPE).with_webhook_id("hook-wait")
}

pub(crate) fn workflow() -> WorkflowSnapshot {
  WorkflowSnapshot::new("wf1", "Approval")
    .with_node(WorkflowNode::new("Start", "manualTrigger"))
    .with_node(wait_node())
    .with_node(WorkflowNode::new("Done", "noop"))
    .with_main_connection("Start", "Wait")
    .with_main_connection("Wait", "Done")
}

fn run(minute: u32) -> TaskData {
  TaskData::new(
    Utc.with_ymd_and_hms(2026, 2, 14, 10, minute, 0).unwrap(),
    Some(json!({ "minute": minute })),
  )
}

/// Execution `id` suspended at `Wait`: two runs recorded for `Wait`, stack head is `Wait`,
/// `waitTill` set.
pub(crate) fn suspended_execution(id: &str) -> Execution {
  let mut result_data = ResultData::default();
  result_data.run_data.insert("Start".to_string(), vec![run(0)]);
  result_data
    .run_data
    .insert("Wait".to_string(), vec![run(1), run(2)]);
  result_data.last_node_executed = Some("Wait".to_string());

  Execution {
    id: id.to_string(),
    workflow_id: "wf1".to_string(),
    finished: false,
    mode: ExecutionMode::Trigger,
    started_at: Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap(),
    stopped_at: None,
    data: RunExecutionData {
      result_data,
      execution_data: Some(ExecutionStackData {
        node_execution_stack: vec![NodeExecutionFrame::new(
          wait_node(),
          json!({ "main": [[{ "json": { "minute": 2 } }]] }),
        )],
      }),
      wait_till: Some(Utc.with_ymd_and_hms(2026, 2, 15, 0, 0, 0).unwrap()),
    },
    workflow_data: workflow(),
  }
}

/// Registry where `wait` exposes a non-restart `default` webhook and a restart `resume`
/// webhook whose method and path come from node parameters (defaults GET and "").
pub(crate) fn registry() -> NodeTypeRegistry {
  let mut registry = NodeTypeRegistry::new();
  registry.register(
    WAIT_TYPE,
    NodeTypeDescription::new()
      .with_webhook(WebhookDescription::new(
        "default",
        ParameterValue::literal("GET"),
        ParameterValue::literal(""),
        false,
      ))
      .with_webhook(
        WebhookDescription::new(
          "resume",
          ParameterValue::parameter("httpMethod", "GET"),
          ParameterValue::parameter("options.webhookSuffix", ""),
          true,
        )
        .with_response_mode("onReceived"),
      ),
  );
  registry
}
