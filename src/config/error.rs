//! Errors raised while locating, parsing or validating configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value is out of range or malformed; `field` is the dotted key
    #[error("Invalid configuration value for {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Both the config directory and the single-file variable are set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Dotted key of the offending value, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_names_field() {
        let err = ConfigError::validation("server.port", "Port must be between 1 and 65535.");
        assert_eq!(err.field(), Some("server.port"));
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for server.port: Port must be between 1 and 65535."
        );
    }

    #[test]
    fn test_other_errors_have_no_field() {
        assert_eq!(ConfigError::file_not_found("config/default.toml").field(), None);
    }
}
