//! Rendering of every error as `application/problem+json`

use std::any::Any;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::response::{IntoResponse, Response};
use baseline_core::{ErrorCode, FunctionalError, HttpError, PROBLEM_JSON, ProblemDetails};
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderValue};

/// Detail shown for failures that were not raised as functional errors
const INTERNAL_DETAIL: &str = "An unexpected error occurred. Please try again later.";

/// Error returned by request handlers
///
/// Functional errors keep their status, code and detail. Anything else is an
/// internal error: it is logged, and the client only sees a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Functional(#[from] FunctionalError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Request data that could not be extracted
    fn invalid_format(status: StatusCode, detail: String) -> Self {
        Self::Functional(FunctionalError::new(status, ErrorCode::InvalidFormat, detail))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_format(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_format(rejection.status(), rejection.body_text())
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Functional(e) => e.status(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn problem(&self) -> ProblemDetails {
        match self {
            Self::Functional(e) => e.problem(),
            Self::Internal(_) => internal_problem(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Functional(e) => tracing::debug!(status = %e.status(), title = e.title(), "functional error"),
            Self::Internal(e) => tracing::error!(error = ?e, "unhandled error"),
        }

        problem_response(&self.problem())
    }
}

/// Serialize a problem with its status and the problem+json content type
pub fn problem_response(problem: &ProblemDetails) -> Response {
    let status = problem.status_code().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
        Json(problem),
    )
        .into_response()
}

fn internal_problem() -> ProblemDetails {
    ProblemDetails::from_code(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, INTERNAL_DETAIL)
}

/// Turn a handler panic into a generic 500 problem
///
/// The panic payload is logged, never sent to the client.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned());

    tracing::error!(panic = %message, "request handler panicked");

    problem_response(&internal_problem())
}

/// JSON body extractor whose rejections are problem documents
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor whose rejections are problem documents
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
