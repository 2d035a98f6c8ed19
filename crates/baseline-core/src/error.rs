use http::StatusCode;

use crate::ProblemDetails;

/// Trait for errors that render as RFC 7807 problem documents
///
/// Implemented by domain error types. The server layer converts these into
/// `application/problem+json` responses, keeping domain errors decoupled from
/// axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Problem document safe to expose to API consumers
    fn problem(&self) -> ProblemDetails;
}
