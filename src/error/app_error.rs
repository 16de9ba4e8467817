use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Every variant maps onto exactly one HTTP status in
/// `api::middleware::error_handler`; handlers never build error responses
/// themselves.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// A collection query returned no rows
    #[error("No {entity} records found")]
    Empty { entity: String },

    /// Another live record already owns a unique value
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Conflict {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Several fields of a request body failed validation
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Malformed identifier or request body
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A duplicate-check lookup failed for a reason other than "not found"
    #[error("Lookup failed: {operation}")]
    Lookup {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Database write or read failure
    #[error("Database operation failed: {operation}")]
    Persistence {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// The upstream service could not be reached
    #[error("{service} is unavailable")]
    UpstreamUnavailable {
        service: String,
        #[source]
        source: anyhow::Error,
    },

    /// The upstream service answered with a non-success status
    #[error("{service} responded with status {status}")]
    UpstreamError { service: String, status: u16 },

    /// The upstream response body could not be decoded
    #[error("{service} returned a malformed response")]
    UpstreamMalformed {
        service: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn conflict(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::Conflict {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Human-readable lines for the `data.errors` list of an error envelope.
    ///
    /// Server-side failures only name the failed operation; sources stay in
    /// the logs.
    pub fn client_messages(&self) -> Vec<String> {
        match self {
            AppError::NotFound { entity, .. } => vec![format!("{} not found", entity)],
            AppError::Empty { entity } => vec![format!("no {}s found", entity)],
            AppError::Conflict { field, value, .. } => {
                vec![format!("{} '{}' is already in use", field, value)]
            }
            AppError::Validation { field, reason } => vec![format!("{}: {}", field, reason)],
            AppError::ValidationErrors { errors } => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
            AppError::InvalidArgument { message } => vec![message.clone()],
            AppError::Lookup { operation, .. } => vec![format!("failed to {}", operation)],
            AppError::Persistence { operation, .. } => vec![format!("failed to {}", operation)],
            AppError::UpstreamUnavailable { service, .. } => {
                vec![format!("failed to reach {}", service)]
            }
            AppError::UpstreamError { service, status } => {
                vec![format!("{} responded with status {}", service, status)]
            }
            AppError::UpstreamMalformed { service, .. } => {
                vec![format!("{} returned an unreadable response", service)]
            }
            AppError::Configuration { key, .. } => vec![format!("configuration error: {}", key)],
            AppError::Internal { .. } => vec!["an internal error occurred".to_string()],
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl<E> From<bb8::RunError<E>> for AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: bb8::RunError<E>) -> Self {
        AppError::Persistence {
            operation: "acquire database connection".to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationErrors { errors }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "username is required"))]
        username: String,
        #[validate(length(min = 1, message = "email is required"))]
        email: String,
        #[validate(length(min = 1))]
        password: String,
    }

    #[test]
    fn test_validation_errors_are_sorted_and_keep_messages() {
        let payload = Payload {
            username: String::new(),
            email: String::new(),
            password: String::new(),
        };
        let error = AppError::from(payload.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "password", "username"]);
                assert_eq!(errors[0].message, "email is required");
                assert_eq!(errors[1].message, "password is invalid");
                assert_eq!(errors[2].message, "username is required");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_config_validation_error_keeps_field_as_key() {
        let error = AppError::from(ConfigError::validation("server.port", "bad port"));
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_client_messages_hide_sources() {
        let error = AppError::Persistence {
            operation: "create user".to_string(),
            source: anyhow::anyhow!("password authentication failed for user postgres"),
        };
        assert_eq!(error.client_messages(), vec!["failed to create user"]);
    }

    #[test]
    fn test_conflict_message_names_field_and_value() {
        let error = AppError::conflict("user", "email", "a@x.com");
        assert_eq!(
            error.client_messages(),
            vec!["email 'a@x.com' is already in use"]
        );
        assert_eq!(
            error.to_string(),
            "Duplicate entry: user.email = 'a@x.com' already exists"
        );
    }
}
