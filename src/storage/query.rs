//! Exercise log query: predicate filtering, date sort and limit
//!
//! All predicates must match (AND semantics). Sorting is stable, so entries
//! sharing a date keep insertion order.

use crate::model::{ExerciseDate, ExerciseEntry};

/// Filter over the `exercises` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseQuery {
    pub user_id: String,
    /// Inclusive lower bound on `date`
    pub from: Option<ExerciseDate>,
    /// Inclusive upper bound on `date`
    pub to: Option<ExerciseDate>,
    /// Maximum number of entries returned
    pub limit: Option<usize>,
}

impl ExerciseQuery {
    /// Every entry belonging to `user_id`
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            from: None,
            to: None,
            limit: None,
        }
    }

    pub fn from_date(mut self, bound: ExerciseDate) -> Self {
        self.from = Some(bound);
        self
    }

    pub fn to_date(mut self, bound: ExerciseDate) -> Self {
        self.to = Some(bound);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Checks if an entry matches every predicate
    pub fn matches(&self, entry: &ExerciseEntry) -> bool {
        if entry.user_id != self.user_id {
            return false;
        }

        if let Some(from) = &self.from {
            if !entry.date.is_on_or_after(from) {
                return false;
            }
        }

        if let Some(to) = &self.to {
            if !entry.date.is_on_or_before(to) {
                return false;
            }
        }

        true
    }

    /// Filters, sorts ascending by date and applies the limit.
    pub fn apply<'a, I>(&self, entries: I) -> Vec<ExerciseEntry>
    where
        I: IntoIterator<Item = &'a ExerciseEntry>,
    {
        let mut matched: Vec<ExerciseEntry> = entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.date.sort_cmp(&b.date));

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
    }
}
