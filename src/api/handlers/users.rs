//! User CRUD handlers and the order side-call, mounted under `/users`.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    Envelope, ErrorEnvelope, MessageEnvelope, OrdersData, UserData, UserRequest, UserResponse, UsersData,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{UserId, ValidatedJson};

/// Routes:
/// - GET /              - List users
/// - POST /             - Create user
/// - GET /{id}          - Get user
/// - PUT /{id}          - Replace user
/// - DELETE /{id}       - Soft-delete user
/// - GET /{id}/orders   - Orders of a user
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
        .routes(routes!(get_user_orders))
}

/// GET /users - List all users
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All live users", body = Envelope<UsersData>),
        (status = 404, description = "No users found", body = ErrorEnvelope),
        (status = 500, description = "Fetch failed", body = ErrorEnvelope)
    )
)]
pub(crate) async fn list_users(State(state): State<AppState>) -> AppResult<Json<Envelope<UsersData>>> {
    let users = state.services.users.list_users().await?;
    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(Envelope::success(
        "users fetched successfully",
        UsersData { users },
    )))
}

/// POST /users - Create user
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = Envelope<UserData>),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 409, description = "Username or email already in use", body = ErrorEnvelope),
        (status = 500, description = "Persistence failure", body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<Envelope<UserData>>> {
    let user = state
        .services
        .users
        .create_user(payload.into_new_user())
        .await?;
    Ok(Json(Envelope::success("user added successfully", user.into())))
}

/// GET /users/{id} - Get user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = Envelope<UserData>),
        (status = 400, description = "Invalid id", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<Envelope<UserData>>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(Envelope::success("user fetched successfully", user.into())))
}

/// PUT /users/{id} - Replace username, email and password
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = Envelope<UserData>),
        (status = 400, description = "Invalid id or body", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 409, description = "Username or email already in use", body = ErrorEnvelope)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<Envelope<UserData>>> {
    let user = state
        .services
        .users
        .update_user(id, payload.into_new_user())
        .await?;
    Ok(Json(Envelope::success("user updated successfully", user.into())))
}

/// DELETE /users/{id} - Soft-delete user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageEnvelope),
        (status = 400, description = "Invalid id", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<MessageEnvelope>> {
    state.services.users.delete_user(id).await?;
    Ok(Json(MessageEnvelope::success("user deleted successfully")))
}

/// GET /users/{id}/orders - Orders of a user from the order service
#[utoipa::path(
    get,
    path = "/{id}/orders",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Orders of the user", body = Envelope<OrdersData>),
        (status = 400, description = "Invalid id", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 500, description = "Order service failure", body = ErrorEnvelope)
    )
)]
async fn get_user_orders(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<Envelope<OrdersData>>> {
    let orders = state.services.orders.orders_for_user(id).await?;
    Ok(Json(Envelope::success(
        "orders fetched successfully",
        OrdersData { orders },
    )))
}
