//! Classification of requests that matched no route
//!
//! A browser deep-linking into the single-page app (e.g. `/addresses/123/edit`)
//! must get the app shell, which then routes client-side. API and management
//! calls must get a structured 404 instead. The decision depends only on the
//! path prefix and the negotiated `Accept` header, never on path depth.

use std::borrow::Cow;

use http::HeaderMap;
use http::header::ACCEPT;

/// Path prefixes that never fall back to the app shell
pub const RESERVED_PREFIXES: [&str; 4] = ["/api/", "/oauth/", "/public/", "/q/"];

/// Media types a browser navigation asks for
const HTML_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// What to answer for an unmatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    /// Serve the redirect document that loads the app shell
    SpaRedirectHtml,
    /// Let the structured not-found pipeline answer
    DeferToProblemPipeline,
}

/// Why a request was classified the way it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationReason {
    ReservedPrefix,
    MachineReadableAccept,
    BrowserNavigation,
}

/// Outcome of classifying one unmatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteClassification {
    pub is_api_like: bool,
    pub action: FallbackAction,
    pub reason: ClassificationReason,
}

impl RouteClassification {
    const fn from_reason(reason: ClassificationReason) -> Self {
        let is_api_like = !matches!(reason, ClassificationReason::BrowserNavigation);

        Self {
            is_api_like,
            action: if is_api_like {
                FallbackAction::DeferToProblemPipeline
            } else {
                FallbackAction::SpaRedirectHtml
            },
            reason,
        }
    }
}

/// Decides between SPA navigation and structured error handling
#[derive(Debug, Clone)]
pub struct PathClassifier {
    reserved_prefixes: Vec<String>,
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new(RESERVED_PREFIXES.iter().map(|p| (*p).to_owned()))
    }
}

impl PathClassifier {
    pub fn new(reserved_prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            reserved_prefixes: reserved_prefixes.into_iter().collect(),
        }
    }

    pub fn reserved_prefixes(&self) -> &[String] {
        &self.reserved_prefixes
    }

    /// Classify an unmatched request
    ///
    /// `path` is the raw request path; it is percent-decoded before prefix
    /// matching, so `/%61pi/x` is reserved like `/api/x`. A reserved prefix
    /// always defers, whatever the `Accept` header says. Other paths defer
    /// only when the client prefers machine-readable content.
    pub fn classify(&self, path: &str, headers: &HeaderMap) -> RouteClassification {
        let reason = if self.reserved_prefix(&decode_path(path)).is_some() {
            ClassificationReason::ReservedPrefix
        } else if prefers_machine_readable(headers) {
            ClassificationReason::MachineReadableAccept
        } else {
            ClassificationReason::BrowserNavigation
        };

        RouteClassification::from_reason(reason)
    }

    /// Reserved prefix matching `path`, if any
    ///
    /// `/api` matches the `/api/` prefix as well.
    pub fn reserved_prefix(&self, path: &str) -> Option<&str> {
        self.reserved_prefixes
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()) || path == prefix.trim_end_matches('/'))
            .map(String::as_str)
    }
}

/// Percent-decode a request path; invalid UTF-8 becomes U+FFFD
fn decode_path(path: &str) -> Cow<'_, str> {
    match urlencoding::decode_binary(path.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(path),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Whether the `Accept` header asks for something other than HTML
///
/// Absent and wildcard-only headers count as browser navigation. Otherwise the
/// highest-weighted concrete media range wins; on equal weight the one listed
/// first wins.
pub fn prefers_machine_readable(headers: &HeaderMap) -> bool {
    let mut best_html: Option<(u16, usize)> = None;
    let mut best_other: Option<(u16, usize)> = None;

    let ranges = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(parse_media_range)
        .enumerate();

    for (index, (media_type, quality)) in ranges {
        if quality == 0 || media_type.ends_with("/*") {
            continue;
        }

        let best = if HTML_TYPES.contains(&media_type.as_str()) {
            &mut best_html
        } else {
            &mut best_other
        };

        if best.is_none_or(|(q, _)| quality > q) {
            *best = Some((quality, index));
        }
    }

    match (best_html, best_other) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some((html_q, html_index)), Some((other_q, other_index))) => {
            other_q > html_q || (other_q == html_q && other_index < html_index)
        }
    }
}

/// Parse one `type/subtype;param=value` entry into its lowercased media type
/// and weight in thousandths
fn parse_media_range(range: &str) -> Option<(String, u16)> {
    let mut parts = range.split(';');
    let media_type = parts.next()?.trim().to_ascii_lowercase();

    if media_type.is_empty() || !media_type.contains('/') {
        return None;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .map_or(1000, |(_, value)| parse_qvalue(value.trim()).unwrap_or(1000));

    Some((media_type, quality))
}

/// Parse an RFC 9110 qvalue (`0` to `1` with up to three decimals) into thousandths
fn parse_qvalue(value: &str) -> Option<u16> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole = match whole {
        "0" => 0,
        "1" => 1000,
        _ => return None,
    };

    let mut millis = 0;
    let mut scale = 100;
    for digit in fraction.bytes() {
        millis += u16::from(digit - b'0') * scale;
        scale /= 10;
    }

    let quality = whole + millis;
    (quality <= 1000).then_some(quality)
}
