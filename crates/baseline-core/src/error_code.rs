use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};
use url::Url;

/// Base URL of the error documentation wiki
///
/// Every code's documentation lives at `{DOCS_BASE_URL}{code}`.
pub const DOCS_BASE_URL: &str = "https://wiki.abstratium.dev/errors/";

static DOCS_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DOCS_BASE_URL).expect("documentation base URL must be absolute"));

/// Registered application error codes
///
/// Each variant maps to a stable code string that never changes meaning once
/// published. New errors get new codes; existing codes are never reused.
///
/// Ranges:
/// - `1000-1999` demo
/// - `2000-2999` authentication and authorization
/// - `3000-3999` validation
/// - `4000-4999` business logic
/// - `5000-5999` system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ErrorCode {
    DemoError,
    DemoNotFound,
    DemoInvalidInput,

    Unauthorized,
    Forbidden,
    InvalidToken,

    ValidationFailed,
    RequiredFieldMissing,
    InvalidFormat,

    BusinessRuleViolation,
    DuplicateEntry,
    InvalidState,

    InternalError,
    DatabaseError,
    ExternalServiceError,
}

impl ErrorCode {
    /// Stable code string (e.g. `ERR-1000`)
    pub const fn code(self) -> &'static str {
        match self {
            Self::DemoError => "ERR-1000",
            Self::DemoNotFound => "ERR-1001",
            Self::DemoInvalidInput => "ERR-1002",
            Self::Unauthorized => "ERR-2000",
            Self::Forbidden => "ERR-2001",
            Self::InvalidToken => "ERR-2002",
            Self::ValidationFailed => "ERR-3000",
            Self::RequiredFieldMissing => "ERR-3001",
            Self::InvalidFormat => "ERR-3002",
            Self::BusinessRuleViolation => "ERR-4000",
            Self::DuplicateEntry => "ERR-4001",
            Self::InvalidState => "ERR-4002",
            Self::InternalError => "ERR-5000",
            Self::DatabaseError => "ERR-5001",
            Self::ExternalServiceError => "ERR-5002",
        }
    }

    /// Human-readable description, used as the problem `title`
    pub const fn description(self) -> &'static str {
        match self {
            Self::DemoError => "Demo error for testing",
            Self::DemoNotFound => "Demo entity not found",
            Self::DemoInvalidInput => "Invalid input for demo entity",
            Self::Unauthorized => "Unauthorized access",
            Self::Forbidden => "Forbidden resource",
            Self::InvalidToken => "Invalid authentication token",
            Self::ValidationFailed => "Validation failed",
            Self::RequiredFieldMissing => "Required field is missing",
            Self::InvalidFormat => "Invalid data format",
            Self::BusinessRuleViolation => "Business rule violation",
            Self::DuplicateEntry => "Duplicate entry detected",
            Self::InvalidState => "Invalid state for operation",
            Self::InternalError => "Internal system error",
            Self::DatabaseError => "Database operation failed",
            Self::ExternalServiceError => "External service unavailable",
        }
    }

    /// Wiki page documenting this error, used as the problem `type`
    pub fn documentation_uri(self) -> Url {
        let mut uri = DOCS_BASE.clone();
        uri.set_path(&format!("{}{}", DOCS_BASE.path(), self.code()));
        uri
    }

    /// Full description of this code
    pub fn describe(self) -> ErrorCodeDescription {
        ErrorCodeDescription {
            code: self.code(),
            description: self.description(),
            documentation_uri: self.documentation_uri(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Look up a registered code by its stable string
impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|code| code.code() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

/// Returned when a code string is not in the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

/// Serializable view of a registered error code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCodeDescription {
    pub code: &'static str,
    pub description: &'static str,
    pub documentation_uri: Url,
}
