use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into `AppError` variants.
///
/// Unique violations become `Conflict`, which is how a duplicate that slipped
/// past the pre-write lookup (two concurrent inserts) still surfaces as 409.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging persistence failures with `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Persistence {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_unique_violation(
                    message,
                    info.details(),
                    info.constraint_name(),
                ) {
                    Some((entity, field, value)) => AppError::Conflict {
                        entity,
                        field,
                        value,
                    },
                    None => Self::persistence(operation, "Unique constraint violation", message),
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                match ConstraintParser::parse_not_null_violation(message, info.column_name()) {
                    Some(field) => AppError::Validation {
                        reason: format!("{} is required", field),
                        field,
                    },
                    None => Self::persistence(operation, "Not null constraint violation", message),
                }
            }
            _ => Self::persistence(operation, "Database error", message),
        }
    }

    fn persistence(operation: &str, prefix: &str, message: &str) -> AppError {
        AppError::Persistence {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{}: {}", prefix, message),
        }
    }
}
