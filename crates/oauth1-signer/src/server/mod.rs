//! HTTP front-end for the signing engine.
//!
//! `POST /sign` accepts `{method, url, params}` and answers with
//! `{authorization}`. Requests pass through per-client rate limiting, a body
//! size limit, a request timeout and security headers before reaching the
//! handler. Target URLs must match an allow-listed prefix.

pub mod middleware;
pub mod policy;
pub mod transport;

use std::net::SocketAddr;

use self::middleware::RateLimitState;
use crate::config::{Config, defaults};

/// OAuth 1.0a signing server.
pub struct SignerServer {
    config: Config,
}

impl SignerServer {
    /// Create a new server.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!(
            prefixes = self.config.allowed_url_prefixes.len(),
            "Starting OAuth signer in HTTP mode on port {}",
            port
        );

        let limiter = RateLimitState::new(
            self.config.rate_limit_per_minute,
            self.config.rate_limit_burst,
            self.config.trust_forwarded_for,
        );
        limiter.start_cleanup_task(defaults::RATE_LIMIT_CLEANUP_INTERVAL);

        let router = transport::create_router_with_limiter(&self.config, limiter);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Configuration this server runs with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for SignerServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerServer")
            .field("allowed_url_prefixes", &self.config.allowed_url_prefixes.len())
            .field("rate_limit_per_minute", &self.config.rate_limit_per_minute)
            .finish_non_exhaustive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
