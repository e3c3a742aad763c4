//! Domain records: users and their exercise log entries.

pub mod coerce;
mod exercise;
mod user;

pub use exercise::{
    ExerciseDate, ExerciseDraft, ExerciseDuration, ExerciseEntry, DATE_DISPLAY_FORMAT,
    INVALID_DATE,
};
pub use user::User;
