//! HTTP transport: router, shared state and handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{RateLimitState, rate_limit, security_header_layers};
use super::policy::UrlAllowList;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{SignRequest, SignResponse};
use crate::oauth::Signer;

/// Shared, read-only state for HTTP handlers.
#[derive(Debug)]
pub struct HttpState {
    /// Signer holding the service credentials.
    pub signer: Signer,

    /// Target URL prefixes that may be signed.
    pub allow_list: UrlAllowList,
}

impl HttpState {
    /// Build handler state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            signer: Signer::new(config.consumer.clone(), config.token.clone()),
            allow_list: UrlAllowList::new(&config.allowed_url_prefixes),
        }
    }
}

/// Create the HTTP router with a fresh rate limiter.
pub fn create_router(config: &Config) -> Router {
    let limiter =
        RateLimitState::new(config.rate_limit_per_minute, config.rate_limit_burst, config.trust_forwarded_for);
    create_router_with_limiter(config, limiter)
}

/// Create the HTTP router around an existing rate limiter.
pub fn create_router_with_limiter(config: &Config, limiter: RateLimitState) -> Router {
    let state = Arc::new(HttpState::from_config(config));

    let signing = Router::new().route("/sign", post(handle_sign)).route_layer(from_fn_with_state(limiter, rate_limit));

    let [csp, nosniff, frame_options, cache_control, referrer_policy] = security_header_layers();

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .merge(signing)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout))
        .layer(csp)
        .layer(nosniff)
        .layer(frame_options)
        .layer(cache_control)
        .layer(referrer_policy)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "oauth1-signer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "oauth1-signer",
        "version": env!("CARGO_PKG_VERSION"),
        "allowed_url_prefixes": state.allow_list.len()
    }))
}

/// `POST /sign`
///
/// Validates the body, enforces the URL allow-list, then signs.
async fn handle_sign(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<SignRequest>, JsonRejection>,
) -> ApiResult<Json<SignResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::malformed_body(rejection.body_text())
        }
    })?;

    let request = body.to_signing_request()?;
    if !state.allow_list.allows(request.url()) {
        tracing::warn!(host = request.url().host_str().unwrap_or_default(), "Target URL outside allow-list");
        return Err(ApiError::url_not_allowed(request.base_url()));
    }

    let collisions = request.reserved_collisions();
    if !collisions.is_empty() {
        tracing::warn!(?collisions, "Ignoring caller-supplied protocol parameters");
    }

    let header = state.signer.sign(&request)?;

    tracing::info!(
        method = %request.method(),
        host = request.url().host_str().unwrap_or_default(),
        params = request.parameters().len(),
        "Signed request"
    );

    Ok(Json(SignResponse { authorization: header.to_string() }))
}
