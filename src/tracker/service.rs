//! Exercise tracker operations
//!
//! Each operation maps one request onto one or more store calls, issued in
//! order with no transaction around them.

use std::sync::Arc;

use tracing::{debug, info};

use super::errors::{TrackerError, TrackerResult};
use crate::model::coerce::parse_int;
use crate::model::{ExerciseDate, ExerciseDraft, ExerciseDuration, ExerciseEntry, User};
use crate::storage::{DeleteSummary, ExerciseQuery, RecordStore};

/// Raw fields of an "add exercise" request, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseInput {
    pub description: String,
    pub duration: String,
    pub date: Option<String>,
}

/// Raw log query parameters, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl LogParams {
    /// Builds the store query. Empty parameters are ignored; a bound that
    /// does not parse is kept as an invalid date and so matches nothing; a
    /// limit that is not a positive integer means no limit.
    pub fn into_query(self, user_id: &str) -> ExerciseQuery {
        let mut query = ExerciseQuery::for_user(user_id);

        if let Some(from) = non_empty(self.from) {
            query = query.from_date(ExerciseDate::parse(&from));
        }
        if let Some(to) = non_empty(self.to) {
            query = query.to_date(ExerciseDate::parse(&to));
        }
        if let Some(limit) = self
            .limit
            .as_deref()
            .and_then(parse_int)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
        {
            query = query.limit(limit);
        }

        query
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A freshly added entry together with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedExercise {
    pub user: User,
    pub entry: ExerciseEntry,
}

/// A user's filtered exercise log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    pub user: User,
    pub entries: Vec<ExerciseEntry>,
}

impl ExerciseLog {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Stateless operations over a shared record store.
#[derive(Clone)]
pub struct ExerciseTracker {
    store: Arc<dyn RecordStore>,
}

impl ExerciseTracker {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns the user named `username`, creating it if absent.
    ///
    /// Lookup and insert are separate store calls: two concurrent calls with
    /// the same name can both insert.
    pub fn register_user(&self, username: &str) -> TrackerResult<User> {
        if let Some(existing) = self.store.find_user_by_username(username)? {
            debug!(user_id = %existing.id, "username already registered");
            return Ok(existing);
        }

        let user = self.store.insert_user(username)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub fn list_users(&self) -> TrackerResult<Vec<User>> {
        Ok(self.store.list_users()?)
    }

    /// Adds an entry to the log of `user_id`, coercing duration and date.
    pub fn add_exercise(&self, user_id: &str, input: ExerciseInput) -> TrackerResult<LoggedExercise> {
        let user = self.find_user(user_id)?;

        let draft = ExerciseDraft {
            user_id: user.id.clone(),
            description: input.description,
            duration: ExerciseDuration::parse(&input.duration),
            date: ExerciseDate::from_input(input.date.as_deref()),
        };

        let entry = self.store.insert_exercise(draft)?;
        debug!(user_id = %user.id, exercise_id = %entry.id, "exercise added");
        Ok(LoggedExercise { user, entry })
    }

    /// Returns the entries of `user_id` matching `params`, earliest first.
    pub fn exercise_log(&self, user_id: &str, params: LogParams) -> TrackerResult<ExerciseLog> {
        let user = self.find_user(user_id)?;
        let query = params.into_query(&user.id);
        let entries = self.store.find_exercises(&query)?;
        Ok(ExerciseLog { user, entries })
    }

    pub fn delete_all_users(&self) -> TrackerResult<DeleteSummary> {
        let summary = self.store.delete_all_users()?;
        info!(deleted = summary.deleted_count, "all users deleted");
        Ok(summary)
    }

    pub fn delete_all_exercises(&self) -> TrackerResult<DeleteSummary> {
        let summary = self.store.delete_all_exercises()?;
        info!(deleted = summary.deleted_count, "all exercises deleted");
        Ok(summary)
    }

    fn find_user(&self, user_id: &str) -> TrackerResult<User> {
        self.store
            .find_user_by_id(user_id)?
            .ok_or(TrackerError::UserNotFound)
    }
}
