mod args;

use std::net::SocketAddr;

use args::Args;
use baseline_config::Config;
use baseline_server::Server;
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A missing or invalid config file aborts startup before anything binds
    let config = Config::load(&args.config)?;
    let _telemetry = baseline_telemetry::init(config.telemetry.as_ref(), &args.log_level)?;

    tracing::info!(
        config_path = %args.config.display(),
        client_log_level = %config.client.log_level,
        baseline_timestamp = %config.build.baseline_timestamp,
        "starting baseline"
    );

    let server = build_server(&config, args.listen)?;

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    server.serve(shutdown).await?;

    tracing::info!("baseline stopped");
    Ok(())
}

/// Server for `config`, listening on `listen` when given
fn build_server(config: &Config, listen: Option<SocketAddr>) -> anyhow::Result<Server> {
    let server = Server::new(config)?;

    Ok(match listen {
        Some(addr) => server.with_listen_address(addr),
        None => server,
    })
}

/// Cancel `token` on the first SIGINT or SIGTERM
async fn cancel_on_signal(token: CancellationToken) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!(signal = "SIGINT", "shutdown requested"),
        () = terminate => tracing::info!(signal = "SIGTERM", "shutdown requested"),
    }

    token.cancel();
}
