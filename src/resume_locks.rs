//! At most one in-flight resume per execution id.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Set of execution ids currently being resumed.
#[derive(Debug, Clone, Default)]
pub struct ResumeLocks {
  in_flight: Arc<DashMap<String, ()>>,
}

/// Claim on one execution id; released on drop.
#[derive(Debug)]
pub struct ResumeGuard {
  execution_id: String,
  in_flight: Arc<DashMap<String, ()>>,
}

impl ResumeLocks {
  pub fn new() -> Self {
    Self::default()
  }

  /// Claims `execution_id`, or returns `None` if another resume of it is in flight.
  pub fn try_acquire(&self, execution_id: &str) -> Option<ResumeGuard> {
    match self.in_flight.entry(execution_id.to_string()) {
      Entry::Occupied(_) => None,
      Entry::Vacant(slot) => {
        slot.insert(());
        Some(ResumeGuard {
          execution_id: execution_id.to_string(),
          in_flight: Arc::clone(&self.in_flight),
        })
      }
    }
  }

  pub fn is_locked(&self, execution_id: &str) -> bool {
    self.in_flight.contains_key(execution_id)
  }

  pub fn in_flight(&self) -> usize {
    self.in_flight.len()
  }
}

impl ResumeGuard {
  pub fn execution_id(&self) -> &str {
    &self.execution_id
  }
}

impl Drop for ResumeGuard {
  fn drop(&mut self) {
    self.in_flight.remove(&self.execution_id);
  }
}
