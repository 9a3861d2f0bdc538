//! Prepares a suspended execution's run data for re-entry at its suspended node.

use tracing::instrument;

use crate::error::ResumeError;
use crate::types::RunExecutionData;

/// Rewrites `data` so the engine can re-enter at `last_node` without repeating work:
///
/// 1. the head frame of the node execution stack is disabled, so the wait is not re-queued;
/// 2. `waitTill` is cleared, so the engine does not suspend again immediately;
/// 3. the last run record of `last_node` is removed, so the step is not counted twice.
///
/// All preconditions are checked before anything changes; on error `data` is untouched.
#[instrument(level = "debug", skip(data))]
pub fn prepare_for_resume(data: &mut RunExecutionData, last_node: &str) -> Result<(), ResumeError> {
  if data.head_frame().is_none() {
    return Err(ResumeError::conflict(
      "The execution has no pending node to resume.",
    ));
  }
  if data.result_data.run_count(last_node) == 0 {
    return Err(ResumeError::conflict(format!(
      "The execution has no recorded run for node \"{}\".",
      last_node
    )));
  }

  if let Some(head) = data
    .execution_data
    .as_mut()
    .and_then(|d| d.node_execution_stack.first_mut())
  {
    head.node.disabled = true;
  }
  data.wait_till = None;
  if let Some(runs) = data.result_data.run_data.get_mut(last_node) {
    runs.pop();
  }
  Ok(())
}
