//! User HTTP Routes
//!
//! Registration and listing of users.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::extract::Payload;
use super::state::TrackerState;
use crate::model::User;
use crate::tracker::TrackerError;

/// User routes with shared state
pub fn user_routes(state: Arc<TrackerState>) -> Router {
    Router::new()
        .route("/api/users", get(list_users_handler).post(register_user_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

// ==================
// Handlers
// ==================

/// Returns the existing user with this name, or registers a new one
async fn register_user_handler(
    State(state): State<Arc<TrackerState>>,
    Payload(request): Payload<RegisterUserRequest>,
) -> Result<Json<UserResponse>, TrackerError> {
    let user = state
        .run(move |tracker| tracker.register_user(&request.username))
        .await?;
    Ok(Json(user.into()))
}

async fn list_users_handler(
    State(state): State<Arc<TrackerState>>,
) -> Result<Json<Vec<UserResponse>>, TrackerError> {
    let users = state.run(|tracker| tracker.list_users()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
