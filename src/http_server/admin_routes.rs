//! Administrative HTTP Routes
//!
//! Bulk deletes used to reset state between test runs. Failures are answered
//! with 200 and a failure message, never an error status.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::state::TrackerState;
use crate::observability::Event;
use crate::storage::DeleteSummary;
use crate::tracker::TrackerResult;

/// Admin routes with shared state
pub fn admin_routes(state: Arc<TrackerState>) -> Router {
    Router::new()
        .route("/api/users/delete", get(delete_all_users_handler))
        .route("/api/exercises/delete", get(delete_all_exercises_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    /// Deletion summary; `null` when the delete failed
    pub result: Option<DeleteSummary>,
}

impl DeleteResponse {
    fn from_outcome(outcome: TrackerResult<DeleteSummary>, what: &str) -> Self {
        match outcome {
            Ok(summary) => Self {
                message: format!("All {} have been deleted!", what),
                result: Some(summary),
            },
            Err(e) => {
                tracing::error!(
                    event = Event::StoreFailure.as_str(),
                    error = %e,
                    "bulk delete of {} failed",
                    what
                );
                Self {
                    message: format!("Failed to delete all {}", what),
                    result: None,
                }
            }
        }
    }
}

async fn delete_all_users_handler(State(state): State<Arc<TrackerState>>) -> Json<DeleteResponse> {
    Json(DeleteResponse::from_outcome(
        state.run(|tracker| tracker.delete_all_users()).await,
        "users",
    ))
}

async fn delete_all_exercises_handler(
    State(state): State<Arc<TrackerState>>,
) -> Json<DeleteResponse> {
    Json(DeleteResponse::from_outcome(
        state.run(|tracker| tracker.delete_all_exercises()).await,
        "exercises",
    ))
}
