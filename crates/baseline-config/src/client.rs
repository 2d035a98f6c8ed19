use serde::Deserialize;

/// Log levels the browser client understands
pub const CLIENT_LOG_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Configuration exposed to the browser client via `/public/config`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Log level for the client-side logger
    pub log_level: String,
}

/// Build metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// RFC 3339 UTC timestamp of the baseline this service was built from
    pub baseline_timestamp: String,
}
