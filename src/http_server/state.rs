//! Shared handler state

use std::sync::Arc;

use crate::storage::{DocumentStore, RecordStore, StoreError};
use crate::tracker::{ExerciseTracker, TrackerError, TrackerResult};

/// State shared across handlers. Handlers keep nothing between requests.
pub struct TrackerState {
    pub tracker: ExerciseTracker,
}

impl TrackerState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            tracker: ExerciseTracker::new(store),
        }
    }

    /// State over an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(DocumentStore::in_memory()))
    }

    /// Runs a tracker operation on the blocking pool. Store calls take std
    /// locks and may fsync, so they stay off the async workers.
    pub async fn run<T, F>(&self, op: F) -> TrackerResult<T>
    where
        F: FnOnce(&ExerciseTracker) -> TrackerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let tracker = self.tracker.clone();
        tokio::task::spawn_blocking(move || op(&tracker))
            .await
            .map_err(|e| {
                TrackerError::Store(StoreError::Unavailable(format!(
                    "store task join error: {}",
                    e
                )))
            })?
    }
}
