//! Renders `AppError` as the error envelope.
//!
//! Status mapping lives in one place so handlers only ever return
//! `AppResult`. Server-side failures are logged with their source chain;
//! the response only names the failed operation.

use axum::{
    Json,
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorEnvelope;
use crate::error::AppError;

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::InvalidArgument { .. }
        | AppError::Validation { .. }
        | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::Conflict { .. } => StatusCode::CONFLICT,
        AppError::NotFound { .. } | AppError::Empty { .. } => StatusCode::NOT_FOUND,
        AppError::Lookup { .. }
        | AppError::Persistence { .. }
        | AppError::UpstreamUnavailable { .. }
        | AppError::UpstreamError { .. }
        | AppError::UpstreamMalformed { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Top-level `message` of the error envelope.
pub fn error_to_message(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidArgument { .. } => "invalid request",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "validation failed",
        AppError::Conflict { .. } => "duplicate entry",
        AppError::NotFound { .. } | AppError::Empty { .. } => "not found",
        AppError::Lookup { .. } | AppError::Persistence { .. } => "database error",
        AppError::UpstreamUnavailable { .. }
        | AppError::UpstreamError { .. }
        | AppError::UpstreamMalformed { .. } => "failed to fetch orders",
        AppError::Configuration { .. } | AppError::Internal { .. } => "internal error",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = %error_chain(&self), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let envelope = ErrorEnvelope::error(error_to_message(&self), self.client_messages());
        (status, Json(envelope)).into_response()
    }
}

/// Renders the full `source()` chain into one line for the log.
fn error_chain(error: &AppError) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain.join(": ")
}

/// Fallback for unmatched routes, so they answer with the envelope too.
pub async fn not_found_fallback(method: Method, uri: axum::http::Uri) -> Response {
    tracing::debug!(%method, %uri, "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::error(
            "not found",
            vec![format!("no route for {} {}", method, uri.path())],
        )),
    )
        .into_response()
}

/// Rewrites bodies of plain-text client errors produced by axum itself
/// (405 from method routing, 413/415 from extractors) into the envelope.
pub async fn envelope_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let message = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_lowercase();
    let allow = response.headers().get(axum::http::header::ALLOW).cloned();
    let mut rewritten =
        (status, Json(ErrorEnvelope::error(&message, vec![message.clone()]))).into_response();
    if let Some(allow) = allow {
        rewritten
            .headers_mut()
            .insert(axum::http::header::ALLOW, allow);
    }
    rewritten
}
