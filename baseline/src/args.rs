use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Baseline application server
#[derive(Debug, Parser)]
#[command(name = "baseline", about = "Single-page app host with RFC 7807 problem responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "baseline.toml", env = "BASELINE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "BASELINE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Server log filter, in `tracing` env-filter syntax
    #[arg(long, default_value = "info", env = "BASELINE_LOG")]
    pub log_level: String,
}
