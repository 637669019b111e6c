//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span from [`RequestSpan`])
//! 3. Request ID (recorded into the request span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Builds the per-request span with an empty `request_id` field that
/// [`request_id_middleware`] fills in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    }
}
