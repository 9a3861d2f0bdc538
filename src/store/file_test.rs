//! Tests for `FileExecutionStore`.

use super::file::is_safe_execution_id;
use super::{ExecutionStore, FileExecutionStore, StoreError};
use crate::test_fixtures::suspended_execution;

#[test]
fn safe_ids() {
  assert!(is_safe_execution_id("E1"));
  assert!(is_safe_execution_id("a-b_c-123"));
  assert!(!is_safe_execution_id(""));
  assert!(!is_safe_execution_id("../etc/passwd"));
  assert!(!is_safe_execution_id("a/b"));
  assert!(!is_safe_execution_id("a.json"));
}

#[tokio::test]
async fn roundtrip_update_fetch() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileExecutionStore::new(dir.path().join("executions"));
  let e = suspended_execution("E1");
  store.update(&e).await.unwrap();
  assert!(store.dir().join("E1.json").exists());

  let loaded = store.fetch_full("E1").await.unwrap().unwrap();
  assert_eq!(loaded, e);
}

#[tokio::test]
async fn payload_is_stored_flattened() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileExecutionStore::new(dir.path());
  store.update(&suspended_execution("E1")).await.unwrap();

  let raw = std::fs::read_to_string(dir.path().join("E1.json")).unwrap();
  let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert!(v["data"].is_string());
  assert_eq!(v["workflowId"], "wf1");
}

#[tokio::test]
async fn missing_or_unsafe_id_is_none() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileExecutionStore::new(dir.path());
  assert!(store.fetch_full("E404").await.unwrap().is_none());
  assert!(store.fetch_full("../E1").await.unwrap().is_none());
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("E1.json"), "{ not json").unwrap();
  let store = FileExecutionStore::new(dir.path());
  let err = store.fetch_full("E1").await.unwrap_err();
  assert!(matches!(err, StoreError::Corrupt(_)));
}

#[tokio::test]
async fn update_rejects_unsafe_id() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileExecutionStore::new(dir.path());
  let err = store.update(&suspended_execution("a/b")).await.unwrap_err();
  assert!(matches!(err, StoreError::Io(_)));
}

#[tokio::test]
async fn hard_delete_removes_file() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileExecutionStore::new(dir.path());
  store.update(&suspended_execution("E1")).await.unwrap();

  assert!(!store.hard_delete("other", "E1").await.unwrap());
  assert!(store.hard_delete("wf1", "E1").await.unwrap());
  assert!(!dir.path().join("E1.json").exists());
}
