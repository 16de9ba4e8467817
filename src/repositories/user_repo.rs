//! User repository for async database operations.
//!
//! Every read filters out soft-deleted rows; a deleted user is invisible to
//! lookups, listings and the duplicate check alike.

use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, UpdateUser, User};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Checks a connection out of the pool for non-transactional reads.
    pub async fn connection(&self) -> AppResult<PooledConnection<'_, AsyncPgConnection>> {
        Ok(self.pool.get().await?)
    }

    /// Runs `f` inside a database transaction on one pooled connection.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back on `Err`,
    /// including early returns through `?`.
    ///
    /// ```ignore
    /// repo.transaction(move |conn| {
    ///     async move { UserRepository::insert(conn, &new_user).await }.scope_boxed()
    /// })
    /// .await?;
    /// ```
    pub async fn transaction<T, F>(&self, f: F) -> AppResult<T>
    where
        F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'static, 'r, AppResult<T>>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        conn.transaction(f).await
    }

    /// Inserts a new user and returns it with generated id and timestamps.
    pub async fn insert(conn: &mut AsyncPgConnection, new_user: &NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create user"))
    }

    /// Finds a live user by id.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn find_by_id(conn: &mut AsyncPgConnection, user_id: i32) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(id.eq(user_id))
            .filter(deleted_at.is_null())
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "fetch user"))
    }

    /// Finds a live user by username.
    pub async fn find_by_username(
        conn: &mut AsyncPgConnection,
        user_name: &str,
    ) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(username.eq(user_name))
            .filter(deleted_at.is_null())
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by username"))
    }

    /// Finds a live user by email address.
    pub async fn find_by_email(
        conn: &mut AsyncPgConnection,
        user_email: &str,
    ) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(email.eq(user_email))
            .filter(deleted_at.is_null())
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by email"))
    }

    /// Lists all live users ordered by id.
    pub async fn list_all(conn: &mut AsyncPgConnection) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(deleted_at.is_null())
            .order(id.asc())
            .select(User::as_select())
            .load(conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "fetch users"))
    }

    /// Overwrites username, email and password of a live user.
    ///
    /// # Returns
    /// `None` when no live user has this id
    pub async fn update(
        conn: &mut AsyncPgConnection,
        user_id: i32,
        update_data: &UpdateUser,
    ) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        diesel::update(users.filter(id.eq(user_id)).filter(deleted_at.is_null()))
            .set(update_data)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))
    }

    /// Marks a live user as deleted.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn soft_delete(conn: &mut AsyncPgConnection, user_id: i32) -> AppResult<usize> {
        use crate::schema::users::dsl::*;

        let now = jiff::Timestamp::now();
        diesel::update(users.filter(id.eq(user_id)).filter(deleted_at.is_null()))
            .set((deleted_at.eq(Some(now.to_diesel())), updated_at.eq(now.to_diesel())))
            .execute(conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))
    }
}
