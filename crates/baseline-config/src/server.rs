use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, spa::SpaConfig};

/// Default location of the health probe, under the management prefix
pub const DEFAULT_HEALTH_PATH: &str = "/q/health";

/// Header scripts send to prove a request did not come from a plain form
pub const DEFAULT_CSRF_HEADER: &str = "X-Requested-With";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub csrf: Option<CsrfConfig>,
    #[serde(default)]
    pub spa: SpaConfig,
}

/// Health probe endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_owned(),
        }
    }
}

/// Header-presence CSRF protection
///
/// Unsafe requests must carry `header_name`; its value is not checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsrfConfig {
    pub enabled: bool,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header_name: DEFAULT_CSRF_HEADER.to_owned(),
        }
    }
}
