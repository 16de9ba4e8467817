//! Middleware for request ids, logging and error envelopes.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{
    envelope_middleware, error_to_message, error_to_status_code, not_found_fallback,
};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
