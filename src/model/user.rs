//! User model
//!
//! Users are stored as documents in the `users` collection.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `username` is unique on a best-effort basis only: registration looks the
/// name up before inserting, and two concurrent registrations may both insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,

    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_with_underscore_id() {
        let user = User {
            id: "65a1".to_string(),
            username: "alice".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"_id": "65a1", "username": "alice"}));

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
