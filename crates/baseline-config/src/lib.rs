#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod cors;
mod env;
mod loader;
pub mod server;
pub mod spa;
pub mod telemetry;

use serde::Deserialize;

pub use client::*;
pub use cors::*;
pub use server::*;
pub use spa::*;
pub use telemetry::TelemetryConfig;

/// Top-level baseline configuration
///
/// `client` and `build` have no defaults: a config file without them fails
/// to load, which aborts startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Values exposed to the browser client
    pub client: ClientConfig,
    /// Build metadata
    pub build: BuildConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
