//! A baseline server bound to an ephemeral local port

use std::future::IntoFuture;
use std::net::{Ipv4Addr, SocketAddr};

use baseline_config::Config;
use baseline_server::Server;
use reqwest::{Method, RequestBuilder};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use super::config::ConfigBuilder;

/// Server running in the test's runtime; stops when dropped
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    stop: CancellationToken,
}

impl TestServer {
    /// Serve `config` on `127.0.0.1` with an OS-assigned port
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let router = Server::new(&config)?.into_router();
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;

        let stop = CancellationToken::new();
        let serving = axum::serve(listener, router).with_graceful_shutdown(stop.clone().cancelled_owned());
        tokio::spawn(serving.into_future());

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            stop,
        })
    }

    /// Serve the builder's default configuration
    pub async fn start_default() -> anyhow::Result<Self> {
        Self::start(ConfigBuilder::new().build()).await
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Request builder for `method` and `path`
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
