use http::StatusCode;
use url::Url;

use crate::{ErrorCode, HttpError, ProblemDetails};

/// Expected business-rule failure raised by handler logic
///
/// Carries the status to answer with, what went wrong (a registered
/// [`ErrorCode`], or a free-text title for ungoverned errors) and an
/// occurrence-specific detail. Translated 1:1 into a [`ProblemDetails`] at the
/// response boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} ({status}): {detail}", self.title())]
pub struct FunctionalError {
    status: StatusCode,
    identity: Identity,
    detail: String,
}

/// What kind of failure a [`FunctionalError`] reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Registered code with stable documentation
    Code(ErrorCode),
    /// Free-text title, optionally with a custom problem type
    Legacy { title: String, problem_type: Option<Url> },
}

impl FunctionalError {
    /// Raise a failure identified by a registered error code
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a 4xx or 5xx code.
    pub fn new(status: StatusCode, code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::with_identity(status, Identity::Code(code), detail.into())
    }

    /// Raise an ungoverned failure with a free-text title
    ///
    /// Prefer [`FunctionalError::new`]; legacy errors have no documentation page.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a 4xx or 5xx code.
    pub fn legacy(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::with_identity(
            status,
            Identity::Legacy {
                title: title.into(),
                problem_type: None,
            },
            detail.into(),
        )
    }

    /// Raise an ungoverned failure with a free-text title and custom type URI
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a 4xx or 5xx code.
    pub fn legacy_with_type(
        status: StatusCode,
        title: impl Into<String>,
        detail: impl Into<String>,
        problem_type: Url,
    ) -> Self {
        Self::with_identity(
            status,
            Identity::Legacy {
                title: title.into(),
                problem_type: Some(problem_type),
            },
            detail.into(),
        )
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, detail)
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, detail)
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, detail)
    }

    fn with_identity(status: StatusCode, identity: Identity, detail: String) -> Self {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "functional errors require an error status, got {status}"
        );

        Self {
            status,
            identity,
            detail,
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Registered code, if this is not a legacy error
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self.identity {
            Identity::Code(code) => Some(code),
            Identity::Legacy { .. } => None,
        }
    }

    pub fn title(&self) -> &str {
        match &self.identity {
            Identity::Code(code) => code.description(),
            Identity::Legacy { title, .. } => title,
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl HttpError for FunctionalError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn problem(&self) -> ProblemDetails {
        match &self.identity {
            Identity::Code(code) => ProblemDetails::from_code(self.status, *code, self.detail.clone()),
            Identity::Legacy { title, problem_type } => {
                let problem = ProblemDetails::new(self.status)
                    .with_title(title.clone())
                    .with_detail(self.detail.clone());

                match problem_type {
                    Some(problem_type) => problem.with_type(problem_type.clone()),
                    None => problem,
                }
            }
        }
    }
}
