//! Front-end middleware: per-client rate limiting and security headers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::ApiError;

/// Content-Security-Policy header value. The API serves JSON only.
const CSP: &str = "default-src 'none'; frame-ancestors 'none'";

/// Keyed GCRA limiter shared by all connections.
pub type ClientRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// Rate limiting state for [`rate_limit`].
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<ClientRateLimiter>,
    trust_forwarded_for: bool,
}

impl RateLimitState {
    /// Create a limiter allowing `per_minute` sustained requests with `burst`
    /// back-to-back requests per client IP.
    #[must_use]
    pub fn new(per_minute: NonZeroU32, burst: NonZeroU32, trust_forwarded_for: bool) -> Self {
        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        Self { limiter: Arc::new(RateLimiter::keyed(quota)), trust_forwarded_for }
    }

    /// Check one request from `client`.
    pub fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.limiter.check_key(&client).map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Number of clients currently tracked.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Drop state for clients whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Periodically prune idle clients in the background.
    pub fn start_cleanup_task(&self, interval: Duration) {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                state.prune();
                tracing::trace!(clients = state.tracked_clients(), "Pruned rate limiter state");
            }
        });
    }

    fn client_ip(&self, req: &Request) -> IpAddr {
        if self.trust_forwarded_for {
            if let Some(ip) = forwarded_for(req.headers()) {
                return ip;
            }
        }
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |ConnectInfo(addr)| addr.ip())
    }
}

impl std::fmt::Debug for RateLimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitState")
            .field("tracked_clients", &self.tracked_clients())
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}

/// First address in `X-Forwarded-For`, the original client per convention.
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers.get("x-forwarded-for")?.to_str().ok()?.split(',').next()?.trim().parse().ok()
}

/// Reject requests over the per-client quota with 429.
pub async fn rate_limit(State(state): State<RateLimitState>, req: Request, next: Next) -> Response {
    let client = state.client_ip(&req);
    match state.check(client) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            tracing::warn!(client = %client, ?retry_after, "Rate limit exceeded");
            ApiError::RateLimited { retry_after }.into_response()
        }
    }
}

/// Layers that add the security headers to every response.
#[must_use]
pub fn security_header_layers() -> [SetResponseHeaderLayer<HeaderValue>; 5] {
    [
        SetResponseHeaderLayer::overriding(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP)),
        SetResponseHeaderLayer::overriding(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        SetResponseHeaderLayer::overriding(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        SetResponseHeaderLayer::overriding(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
    ]
}
