//! Exercise HTTP Routes
//!
//! Adding exercises to a user's log and reading the log back.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::extract::{text_or_number, Payload};
use super::state::TrackerState;
use crate::model::{ExerciseDuration, ExerciseEntry};
use crate::tracker::{ExerciseInput, LogParams, TrackerError};

/// Exercise routes with shared state
pub fn exercise_routes(state: Arc<TrackerState>) -> Router {
    Router::new()
        .route("/api/users/:_id/exercises", post(add_exercise_handler))
        .route("/api/users/:_id/logs", get(exercise_log_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub duration: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl From<AddExerciseRequest> for ExerciseInput {
    fn from(request: AddExerciseRequest) -> Self {
        Self {
            description: request.description,
            duration: request.duration,
            date: request.date,
        }
    }
}

/// Query string of the log endpoint. Kept as text so malformed values are
/// coerced rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl From<LogQuery> for LogParams {
    fn from(query: LogQuery) -> Self {
        Self {
            from: query.from,
            to: query.to,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    /// Identifier of the owning user
    #[serde(rename = "_id")]
    pub user_id: String,
    pub username: String,
    pub description: String,
    pub duration: ExerciseDuration,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct LogEntryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub duration: ExerciseDuration,
    pub date: String,
}

impl From<ExerciseEntry> for LogEntryResponse {
    fn from(entry: ExerciseEntry) -> Self {
        Self {
            date: entry.date.render(),
            id: entry.id,
            description: entry.description,
            duration: entry.duration,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntryResponse>,
}

// ==================
// Handlers
// ==================

async fn add_exercise_handler(
    State(state): State<Arc<TrackerState>>,
    Path(user_id): Path<String>,
    Payload(request): Payload<AddExerciseRequest>,
) -> Result<Json<ExerciseResponse>, TrackerError> {
    let logged = state
        .run(move |tracker| tracker.add_exercise(&user_id, request.into()))
        .await?;

    Ok(Json(ExerciseResponse {
        user_id: logged.user.id,
        username: logged.user.username,
        description: logged.entry.description,
        duration: logged.entry.duration,
        date: logged.entry.date.render(),
    }))
}

async fn exercise_log_handler(
    State(state): State<Arc<TrackerState>>,
    Path(user_id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogResponse>, TrackerError> {
    let log = state
        .run(move |tracker| tracker.exercise_log(&user_id, query.into()))
        .await?;

    Ok(Json(LogResponse {
        count: log.count(),
        user_id: log.user.id,
        username: log.user.username,
        log: log.entries.into_iter().map(LogEntryResponse::from).collect(),
    }))
}
