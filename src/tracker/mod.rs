//! # Exercise Tracker
//!
//! Request-level operations: register users, record exercises and answer
//! date-filtered log queries against a [`RecordStore`](crate::storage::RecordStore).

mod errors;
mod service;

pub use errors::{TrackerError, TrackerResult};
pub use service::{ExerciseInput, ExerciseLog, ExerciseTracker, LogParams, LoggedExercise};
