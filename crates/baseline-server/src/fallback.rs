use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use baseline_core::{FallbackAction, PathClassifier, ProblemDetails};
use http::{HeaderMap, StatusCode, Uri};
use indoc::indoc;

use crate::problem::problem_response;

/// Document that sends the browser to the app root, where client-side routing
/// takes over
pub const SPA_REDIRECT_HTML: &str = indoc! {r#"
    <!DOCTYPE html>
    <html>
    <head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="0;url=/">
    <title>Redirecting</title>
    </head>
    <body></body>
    </html>
"#};

/// Answer an unmatched request with the app shell redirect, if it is a
/// browser navigation
///
/// Returns `None` for API-like requests so the caller produces a structured
/// not-found problem instead.
pub fn spa_fallback(classifier: &PathClassifier, path: &str, headers: &HeaderMap) -> Option<Response> {
    let classification = classifier.classify(path, headers);

    match classification.action {
        FallbackAction::SpaRedirectHtml => {
            tracing::debug!(path, "serving app shell redirect");
            Some((StatusCode::OK, Html(SPA_REDIRECT_HTML)).into_response())
        }
        FallbackAction::DeferToProblemPipeline => {
            tracing::debug!(path, reason = ?classification.reason, "deferring unmatched request");
            None
        }
    }
}

/// Router fallback: app shell for navigations, 404 problem otherwise
///
/// With no classifier the SPA fallback is disabled and every unmatched
/// request gets the 404 problem.
pub async fn not_found_handler(classifier: Option<Arc<PathClassifier>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path();

    classifier
        .and_then(|classifier| spa_fallback(&classifier, path, &headers))
        .unwrap_or_else(|| not_found_problem(path))
}

/// Fallback for a path that exists but not for the request's method
pub async fn method_not_allowed_handler(uri: Uri) -> Response {
    let path = uri.path();

    let problem = ProblemDetails::new(StatusCode::METHOD_NOT_ALLOWED)
        .with_title("Method Not Allowed")
        .with_detail(format!("The resource at {path} does not support this method"))
        .with_instance(path);

    problem_response(&problem)
}

fn not_found_problem(path: &str) -> Response {
    let problem = ProblemDetails::new(StatusCode::NOT_FOUND)
        .with_title("Not Found")
        .with_detail(format!("No resource found at {path}"))
        .with_instance(path);

    problem_response(&problem)
}
