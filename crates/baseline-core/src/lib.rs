//! Framework-agnostic error model and fallback routing decisions

#![allow(clippy::must_use_candidate)]

mod error;
mod error_code;
pub mod fallback;
mod functional;
mod problem;

pub use error::HttpError;
pub use error_code::{DOCS_BASE_URL, ErrorCode, ErrorCodeDescription, UnknownErrorCode};
pub use fallback::{ClassificationReason, FallbackAction, PathClassifier, RouteClassification};
pub use functional::{FunctionalError, Identity};
pub use problem::{ABOUT_BLANK, PROBLEM_JSON, ProblemDetails};
