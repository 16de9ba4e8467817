//! User service for business logic operations.
//!
//! Every write runs in one transaction: duplicate check, then the write.
//! Any error returned from the closure rolls the transaction back.

use diesel_async::scoped_futures::ScopedFutureExt;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserRepository;
use crate::services::ensure_unique;

/// User service for handling user-related business logic.
///
/// Since `UserRepository` uses `Arc` internally via the connection pool,
/// cloning is cheap.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates a new user after checking username and email are free.
    ///
    /// # Returns
    /// The created user with generated id and timestamps
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = self
            .repo
            .transaction(move |conn| {
                async move {
                    ensure_unique(conn, &new_user.username, &new_user.email, None).await?;
                    UserRepository::insert(conn, &new_user).await
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Gets a live user by id, or `NotFound`.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        let mut conn = self.repo.connection().await?;
        UserRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    /// Lists all live users ordered by id.
    ///
    /// An empty table is reported as `Empty` rather than an empty list.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut conn = self.repo.connection().await?;
        let users = UserRepository::list_all(&mut conn).await?;
        if users.is_empty() {
            return Err(AppError::Empty {
                entity: "user".to_string(),
            });
        }
        Ok(users)
    }

    /// Overwrites username, email and password of an existing user.
    pub async fn update_user(&self, id: i32, replacement: NewUser) -> AppResult<User> {
        let user = self
            .repo
            .transaction(move |conn| {
                async move {
                    if UserRepository::find_by_id(conn, id).await?.is_none() {
                        return Err(AppError::not_found("user", "id", id));
                    }

                    ensure_unique(conn, &replacement.username, &replacement.email, Some(id))
                        .await?;

                    let changes = UpdateUser {
                        username: replacement.username,
                        email: replacement.email,
                        password: replacement.password,
                        updated_at: jiff::Timestamp::now().to_diesel(),
                    };
                    UserRepository::update(conn, id, &changes)
                        .await?
                        .ok_or_else(|| AppError::not_found("user", "id", id))
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Soft-deletes an existing user.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repo
            .transaction(move |conn| {
                async move {
                    if UserRepository::find_by_id(conn, id).await?.is_none() {
                        return Err(AppError::not_found("user", "id", id));
                    }
                    UserRepository::soft_delete(conn, id).await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
