use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use baseline_core::{ErrorCode, FunctionalError};
use http::header::HeaderName;
use http::{Method, StatusCode};

use crate::problem::ApiError;

/// CSRF protection middleware
///
/// Unsafe methods must carry `header_name`; the value is ignored. Requests
/// without it are rejected with a `Forbidden` problem.
pub async fn csrf_middleware(header_name: HeaderName, request: Request, next: Next) -> Response {
    if is_safe(request.method()) || request.headers().contains_key(&header_name) {
        return next.run(request).await;
    }

    tracing::debug!(method = %request.method(), path = request.uri().path(), "rejecting request without CSRF header");

    ApiError::from(FunctionalError::new(
        StatusCode::FORBIDDEN,
        ErrorCode::Forbidden,
        format!("missing CSRF header: {header_name}"),
    ))
    .into_response()
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
