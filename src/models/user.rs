use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// User model for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Surrogate key assigned by the store
    pub user_id: i32,
    /// Unique login handle
    pub username: String,
    /// Display name
    pub name: String,
}

/// Body of `POST /api/users`. Fields are optional so a missing key is a
/// validation failure rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct NewUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
}

/// A user payload that passed validation and is ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
}

impl NewUserRequest {
    /// Check required fields. Uniqueness is enforced on insert.
    pub fn validate(self) -> Result<NewUser> {
        let username = required_text("username", self.username)?;
        let name = required_text("name", self.name)?;
        Ok(NewUser { username, name })
    }
}

/// Require a present, non-blank string. The value is returned untrimmed.
pub(crate) fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AppError::validation(format!("{field} must not be empty"))),
        None => Err(AppError::validation(format!("missing required field: {field}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_payload() {
        let request = NewUserRequest {
            username: Some("unique-username".to_string()),
            name: Some("full name".to_string()),
        };

        let user = request.validate().unwrap();
        assert_eq!(user.username, "unique-username");
        assert_eq!(user.name, "full name");
    }

    #[test]
    fn test_validate_missing_username() {
        let request = NewUserRequest {
            username: None,
            name: Some("full name".to_string()),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_missing_name() {
        let request = NewUserRequest {
            username: Some("unique-username".to_string()),
            name: None,
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_blank_fields() {
        let request = NewUserRequest {
            username: Some("   ".to_string()),
            name: Some("full name".to_string()),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));

        let request = NewUserRequest {
            username: Some("someone".to_string()),
            name: Some(String::new()),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_user_serializes_with_expected_keys() {
        let user = User {
            user_id: 1,
            username: "robert_plant".to_string(),
            name: "Robert".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "user_id": 1, "username": "robert_plant", "name": "Robert" })
        );
    }
}
