//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Body of both `POST /users` and `PUT /users/{id}`.
///
/// Missing fields deserialize to empty strings so that an absent field and
/// an empty one report the same validation message.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct UserRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(format = "password")]
    pub password: String,
}

impl UserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Public view of a user; the password never leaves the service.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_jiff(),
            updated_at: user.updated_at.to_jiff(),
        }
    }
}

/// `data` of a single-user envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: UserResponse,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self { user: user.into() }
    }
}

/// `data` of the user-list envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersData {
    pub users: Vec<UserResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff_diesel::ToDiesel;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: UserRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(request.username, "alice");
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_validation_reports_each_empty_field() {
        let request = UserRequest::default();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields["email"][0].message.as_deref(),
            Some("email is required")
        );
    }

    #[test]
    fn test_full_request_validates() {
        let request = UserRequest {
            username: "a".into(),
            email: "a@x.com".into(),
            password: "p".into(),
        };
        assert!(request.validate().is_ok());

        let new_user = request.into_new_user();
        assert_eq!(new_user.username, "a");
        assert_eq!(new_user.email, "a@x.com");
        assert_eq!(new_user.password, "p");
    }

    #[test]
    fn test_response_omits_password() {
        let now = jiff::Timestamp::now();
        let user = User {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret".into(),
            created_at: now.to_diesel(),
            updated_at: now.to_diesel(),
            deleted_at: None,
        };

        let value = serde_json::to_value(UserData::from(user)).unwrap();
        assert_eq!(value["user"]["id"], 7);
        assert_eq!(value["user"]["username"], "alice");
        assert!(value["user"].get("password").is_none());
        assert!(value["user"]["created_at"].is_string());
    }
}
