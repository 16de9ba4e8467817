//! Username/email uniqueness check run inside the write transaction.

use diesel_async::AsyncPgConnection;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::UserRepository;

/// Rejects a username or email already owned by another live user.
///
/// `exclude_id` is the user being updated, so keeping one's own username or
/// email never conflicts. Username is checked before email.
pub async fn ensure_unique(
    conn: &mut AsyncPgConnection,
    username: &str,
    email: &str,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let by_username = UserRepository::find_by_username(conn, username)
        .await
        .map_err(|e| into_lookup(e, "check username availability"))?;
    reject_if_taken(by_username, exclude_id, "username", username)?;

    let by_email = UserRepository::find_by_email(conn, email)
        .await
        .map_err(|e| into_lookup(e, "check email availability"))?;
    reject_if_taken(by_email, exclude_id, "email", email)
}

fn reject_if_taken(
    existing: Option<User>,
    exclude_id: Option<i32>,
    field: &str,
    value: &str,
) -> AppResult<()> {
    match existing {
        Some(user) if Some(user.id) != exclude_id => Err(AppError::conflict("user", field, value)),
        _ => Ok(()),
    }
}

fn into_lookup(error: AppError, operation: &str) -> AppError {
    match error {
        AppError::Persistence { source, .. } => AppError::Lookup {
            operation: operation.to_string(),
            source,
        },
        other => other,
    }
}
