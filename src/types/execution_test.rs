//! Tests for `Execution` and its persisted layout.

use serde_json::json;

use super::{Execution, ExecutionError, ExecutionMode};

fn persisted() -> serde_json::Value {
  json!({
    "id": "E1",
    "workflowId": "wf1",
    "finished": false,
    "mode": "webhook",
    "startedAt": "2026-02-14T10:00:00Z",
    "data": {
      "resultData": {
        "runData": {
          "Start": [{ "startTime": "2026-02-14T10:00:00Z", "executionTime": 3 }],
          "Wait": [
            { "startTime": "2026-02-14T10:00:01Z", "executionTime": 1, "data": { "a": 1 } }
          ]
        },
        "lastNodeExecuted": "Wait"
      },
      "executionData": {
        "nodeExecutionStack": [
          { "node": { "name": "Wait", "type": "wait", "parameters": {} }, "data": {} }
        ]
      },
      "waitTill": "2026-02-15T00:00:00Z"
    },
    "workflowData": {
      "id": "wf1",
      "name": "Approval",
      "nodes": [
        { "name": "Start", "type": "manualTrigger" },
        { "name": "Wait", "type": "wait", "typeVersion": 1.1 }
      ],
      "connections": {
        "Start": { "main": [[{ "node": "Wait", "type": "main", "index": 0 }]] }
      }
    }
  })
}

#[test]
fn deserializes_persisted_layout() {
  let e: Execution = serde_json::from_value(persisted()).unwrap();
  assert_eq!(e.id, "E1");
  assert_eq!(e.mode, ExecutionMode::Webhook);
  assert_eq!(e.last_node_executed(), Some("Wait"));
  assert_eq!(e.data.result_data.run_count("Wait"), 1);
  assert_eq!(e.data.result_data.run_count("Missing"), 0);
  assert!(e.data.wait_till.is_some());
  assert_eq!(e.data.head_frame().unwrap().node.name, "Wait");
  assert_eq!(e.workflow_data.nodes[1].type_version, 1.1);
  assert_eq!(e.workflow_data.connections["Start"]["main"][0][0].node, "Wait");
}

#[test]
fn serializes_camel_case_and_omits_empty_fields() {
  let e: Execution = serde_json::from_value(persisted()).unwrap();
  let v = serde_json::to_value(&e).unwrap();
  assert_eq!(v["workflowId"], "wf1");
  assert_eq!(v["data"]["resultData"]["lastNodeExecuted"], "Wait");
  assert!(v["data"]["resultData"].get("error").is_none());
  assert!(v.get("stoppedAt").is_none());
  assert!(v["workflowData"]["nodes"][0].get("disabled").is_none());
}

#[test]
fn has_terminated_when_finished_or_errored() {
  let mut e: Execution = serde_json::from_value(persisted()).unwrap();
  assert!(!e.has_terminated());
  e.finished = true;
  assert!(e.has_terminated());
  e.finished = false;
  e.data.result_data.error = Some(ExecutionError::new("boom").with_node("Wait"));
  assert!(e.has_terminated());
}

#[test]
fn missing_data_defaults_to_empty_payload() {
  let mut v = persisted();
  v.as_object_mut().unwrap().remove("data");
  let e: Execution = serde_json::from_value(v).unwrap();
  assert!(e.data.result_data.run_data.is_empty());
  assert!(e.data.head_frame().is_none());
  assert!(e.last_node_executed().is_none());
}

#[test]
fn execution_error_display_names_node() {
  let err = ExecutionError::new("boom").with_node("Wait");
  assert_eq!(err.to_string(), "boom (node \"Wait\")");
  assert_eq!(ExecutionError::new("plain").to_string(), "plain");
}
