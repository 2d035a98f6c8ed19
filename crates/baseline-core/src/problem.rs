//! RFC 7807 problem details

use http::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ErrorCode;

/// Media type of a serialized [`ProblemDetails`]
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Problem type assumed when `type` is absent
pub const ABOUT_BLANK: &str = "about:blank";

/// A single error occurrence, serialized as `application/problem+json`
///
/// Only present fields are serialized. Deserialization accepts any subset of
/// the five members so documents produced by older services still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Absolute URI identifying the problem type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<Url>,
    /// Short summary, stable across occurrences of the same problem type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Explanation specific to this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// URI reference identifying this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Start a problem with the given error status
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a 4xx or 5xx code. Building a problem for a
    /// successful response is a programming error.
    pub fn new(status: StatusCode) -> Self {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "problem details require an error status, got {status}"
        );

        Self {
            status: Some(status.as_u16()),
            ..Self::default()
        }
    }

    /// Build a problem from a registered error code
    ///
    /// `title` and `type` come from the code, `detail` describes the occurrence.
    pub fn from_code(status: StatusCode, code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::new(status)
            .with_title(code.description())
            .with_type(code.documentation_uri())
            .with_detail(detail)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, problem_type: Url) -> Self {
        self.problem_type = Some(problem_type);
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Problem type, falling back to `about:blank` when absent
    pub fn type_uri(&self) -> &str {
        self.problem_type.as_ref().map_or(ABOUT_BLANK, Url::as_str)
    }

    /// Status as an HTTP status code, if present and valid
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status.and_then(|s| StatusCode::from_u16(s).ok())
    }
}
