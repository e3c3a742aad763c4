//! # Tracker Errors

use thiserror::Error;

use crate::storage::StoreError;

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Failures surfaced by tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The user referenced by the request does not exist
    #[error("User not found")]
    UserNotFound,

    /// The record store failed; details are for the server log only
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrackerError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TrackerError::UserNotFound => 404,
            TrackerError::Store(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
