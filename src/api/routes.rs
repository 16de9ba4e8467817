//! Router assembly: routes, OpenAPI document and middleware stack.

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    envelope_middleware, logging_middleware, not_found_fallback, request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the application router.
///
/// Layers run outermost first: request id, logging, CORS, compression,
/// envelope rewriting, request timeout. Logging therefore sees the request
/// id and the final status of every response, and a timed-out request
/// leaves the timeout layer as a bare 408 that the envelope layer rewrites.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/users", handlers::users::user_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .route(
            OPENAPI_PATH,
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        // Nested "/" only matches "/users"
        .route("/users/", get(handlers::users::list_users).post(handlers::users::create_user))
        .fallback(not_found_fallback)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(middleware::from_fn(envelope_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
