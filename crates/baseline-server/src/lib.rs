mod cors;
mod csrf;
pub mod demo;
pub mod fallback;
mod health;
pub mod problem;
pub mod public;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use baseline_config::Config;
use baseline_core::PathClassifier;
use http::header::HeaderName;
use http::{HeaderMap, Uri};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use problem::{ApiError, ApiJson, ApiPath, problem_response};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the CSRF header name is not a valid HTTP header name
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Demo resource
        let demo_store = Arc::new(demo::DemoStore::default());
        app = app.merge(demo::endpoint_router().with_state(demo_store));

        // Client configuration
        let settings = Arc::new(public::ClientSettings::from(config));
        app = app.merge(public::endpoint_router().with_state(settings));

        // Known path, unsupported method
        app = app.method_not_allowed_fallback(fallback::method_not_allowed_handler);

        // No route matched: app shell for browser navigations, 404 problem otherwise
        let classifier = config
            .server
            .spa
            .enabled
            .then(|| Arc::new(PathClassifier::new(config.server.spa.reserved_prefixes.iter().cloned())));
        app = app.fallback(move |uri: Uri, headers: HeaderMap| fallback::not_found_handler(classifier.clone(), uri, headers));

        // Apply middleware layers (innermost first)

        // Panics become 500 problems
        app = app.layer(CatchPanicLayer::custom(problem::panic_response));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CSRF protection
        if let Some(ref csrf_config) = config.server.csrf
            && csrf_config.enabled
        {
            let header_name = HeaderName::try_from(csrf_config.header_name.as_str())
                .map_err(|e| anyhow::anyhow!("invalid CSRF header name '{}': {e}", csrf_config.header_name))?;
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let header_name = header_name.clone();
                async move { csrf::csrf_middleware(header_name, req, next).await }
            }));
        }

        // CORS (outermost, so preflight requests never reach CSRF checks)
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Override the configured listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
