//! Record store trait
//!
//! Abstracts storage operations for the `users` and `exercises` collections.

use serde::{Deserialize, Serialize};

use super::errors::StoreResult;
use super::query::ExerciseQuery;
use crate::model::{ExerciseDraft, ExerciseEntry, User};

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteSummary {
    pub fn deleted(count: usize) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count as u64,
        }
    }
}

/// Persistence for users and exercise entries.
///
/// Each call is atomic on its own; callers that need check-then-insert
/// get no isolation between the two calls.
pub trait RecordStore: Send + Sync {
    /// Insert a new user. Rejects an empty `username`.
    fn insert_user(&self, username: &str) -> StoreResult<User>;

    /// Find a user by identifier
    fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Find the first user with exactly this `username`
    fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// All users in insertion order
    fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Delete every user
    fn delete_all_users(&self) -> StoreResult<DeleteSummary>;

    /// Insert a new exercise entry. Rejects an empty `description`.
    fn insert_exercise(&self, draft: ExerciseDraft) -> StoreResult<ExerciseEntry>;

    /// Entries matching `query`, ascending by date
    fn find_exercises(&self, query: &ExerciseQuery) -> StoreResult<Vec<ExerciseEntry>>;

    /// Delete every exercise entry
    fn delete_all_exercises(&self) -> StoreResult<DeleteSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_summary_shape() {
        let json = serde_json::to_value(DeleteSummary::deleted(3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"acknowledged": true, "deletedCount": 3})
        );
    }
}
