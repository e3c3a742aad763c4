//! Exercise log entries
//!
//! Durations and dates arrive as free text and are coerced, never rejected.
//! A duration with no leading integer is "not a number" and renders as
//! `null`; a date that does not parse is an invalid date and renders as
//! `"Invalid Date"`. Both are stored as-is.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::coerce::{parse_date, parse_int};

/// Rendering used for every date in a response: `Mon Jan 01 2024`
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Rendering of a date that failed to parse
pub const INVALID_DATE: &str = "Invalid Date";

/// Calendar date of an exercise, possibly invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseDate {
    Valid(DateTime<Utc>),
    Invalid,
}

impl ExerciseDate {
    pub fn now() -> Self {
        ExerciseDate::Valid(Utc::now())
    }

    /// Parses `input`, yielding `Invalid` rather than an error.
    pub fn parse(input: &str) -> Self {
        match parse_date(input) {
            Some(dt) => ExerciseDate::Valid(dt),
            None => ExerciseDate::Invalid,
        }
    }

    /// Date for a new entry: absent or empty input means "now".
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            Some(text) if !text.is_empty() => Self::parse(text),
            _ => Self::now(),
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            ExerciseDate::Valid(dt) => Some(*dt),
            ExerciseDate::Invalid => None,
        }
    }

    /// Human-readable calendar date without time of day.
    pub fn render(&self) -> String {
        match self {
            ExerciseDate::Valid(dt) => dt.format(DATE_DISPLAY_FORMAT).to_string(),
            ExerciseDate::Invalid => INVALID_DATE.to_string(),
        }
    }

    /// Ordering used to sort a log. Invalid dates sort before every valid one.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.as_datetime().cmp(&other.as_datetime())
    }

    /// `self >= bound`; false whenever either side is invalid.
    pub fn is_on_or_after(&self, bound: &Self) -> bool {
        match (self.as_datetime(), bound.as_datetime()) {
            (Some(date), Some(bound)) => date >= bound,
            _ => false,
        }
    }

    /// `self <= bound`; false whenever either side is invalid.
    pub fn is_on_or_before(&self, bound: &Self) -> bool {
        match (self.as_datetime(), bound.as_datetime()) {
            (Some(date), Some(bound)) => date <= bound,
            _ => false,
        }
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// Stored as an RFC 3339 string, or null when invalid.
impl Serialize for ExerciseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExerciseDate::Valid(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            ExerciseDate::Invalid => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ExerciseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw {
            Some(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(dt) => ExerciseDate::Valid(dt.with_timezone(&Utc)),
                Err(_) => ExerciseDate::Invalid,
            },
            None => ExerciseDate::Invalid,
        })
    }
}

/// Exercise duration in minutes; `None` is "not a number".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseDuration(pub Option<i64>);

impl ExerciseDuration {
    /// Truncating integer parse of `input`.
    pub fn parse(input: &str) -> Self {
        ExerciseDuration(parse_int(input))
    }
}

/// A stored exercise log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning user. Checked at creation time, not enforced by the store.
    #[serde(rename = "userId")]
    pub user_id: String,

    pub description: String,
    pub duration: ExerciseDuration,
    pub date: ExerciseDate,
}

/// An exercise entry before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub user_id: String,
    pub description: String,
    pub duration: ExerciseDuration,
    pub date: ExerciseDate,
}

impl ExerciseDraft {
    pub fn into_entry(self, id: String) -> ExerciseEntry {
        ExerciseEntry {
            id,
            user_id: self.user_id,
            description: self.description,
            duration: self.duration,
            date: self.date,
        }
    }
}
