//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use baseline_config::{
    BuildConfig, ClientConfig, Config, CorsConfig, CsrfConfig, HealthConfig, ServerConfig, SpaConfig,
};

/// Build timestamp used by every test configuration
pub const BUILD_TIMESTAMP: &str = "2025-11-20T08:15:00Z";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    spa: SpaConfig::default(),
                    ..ServerConfig::default()
                },
                client: ClientConfig {
                    log_level: "INFO".to_owned(),
                },
                build: BuildConfig {
                    baseline_timestamp: BUILD_TIMESTAMP.to_owned(),
                },
                telemetry: None,
            },
        }
    }

    /// Set the log level exposed to the client
    pub fn with_client_log_level(mut self, level: &str) -> Self {
        self.config.client.log_level = level.to_owned();
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Set CSRF configuration
    pub fn with_csrf(mut self, config: CsrfConfig) -> Self {
        self.config.server.csrf = Some(config);
        self
    }

    /// Replace the reserved prefixes of the SPA fallback
    pub fn with_reserved_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.config.server.spa.reserved_prefixes = prefixes.iter().map(|p| (*p).to_owned()).collect();
        self
    }

    /// Disable the SPA fallback
    pub fn without_spa(mut self) -> Self {
        self.config.server.spa.enabled = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
