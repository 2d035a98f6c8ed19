use baseline_core::fallback::RESERVED_PREFIXES;
use serde::Deserialize;

/// Single-page app fallback configuration
///
/// Unmatched requests outside the reserved prefixes get a redirect to the app
/// shell instead of a 404.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Path prefixes that always get structured errors
    #[serde(default = "default_reserved_prefixes")]
    pub reserved_prefixes: Vec<String>,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reserved_prefixes: default_reserved_prefixes(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_reserved_prefixes() -> Vec<String> {
    RESERVED_PREFIXES.iter().map(|p| (*p).to_owned()).collect()
}
