//! Error types for the OAuth 1.0a signing service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::models::ErrorResponse;

/// Errors from the signing engine.
#[derive(thiserror::Error, Debug)]
pub enum SignError {
    /// Method, URL or parameters are missing or malformed.
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Input that failed validation
        field: &'static str,
        /// Validation error message
        message: String,
    },

    /// The HMAC primitive rejected the signing key.
    #[error("Signing failed: {0}")]
    SigningFailure(String),
}

impl SignError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput { field, message: message.into() }
    }

    /// Create a signing failure.
    #[must_use]
    pub fn signing_failure(message: impl Into<String>) -> Self {
        Self::SigningFailure(message.into())
    }

    /// Returns true if the caller can fix this error by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Errors raised while loading startup configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// One or more required environment variables are absent or empty.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    /// A configuration value could not be parsed.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// Variable or flag name
        name: &'static str,
        /// Parse error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue { name, message: message.into() }
    }
}

/// Errors surfaced to HTTP callers of the front-end.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Required body fields are absent.
    #[error("method and url are required")]
    MissingFields,

    /// Body is not valid JSON or has an unexpected shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Body exceeds the configured size limit.
    #[error("Request body too large")]
    BodyTooLarge,

    /// Target URL is outside every allow-listed prefix.
    #[error("Target URL is not allowed: {url}")]
    UrlNotAllowed {
        /// Rejected target URL
        url: String,
    },

    /// Client exceeded its request quota.
    #[error("Too many requests, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Error from the signing engine
    #[error(transparent)]
    Sign(#[from] SignError),
}

impl ApiError {
    /// Create a malformed body error.
    #[must_use]
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::MalformedBody(message.into())
    }

    /// Create a URL-not-allowed error.
    #[must_use]
    pub fn url_not_allowed(url: impl Into<String>) -> Self {
        Self::UrlNotAllowed { url: url.into() }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UrlNotAllowed { .. } => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Sign(SignError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            Self::Sign(SignError::SigningFailure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Sign(SignError::SigningFailure(_)) => "Internal signing error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut response = (status, Json(ErrorResponse { error: self.to_user_message() })).into_response();

        if let Self::RateLimited { retry_after } = self {
            let seconds = retry_after.as_secs().max(1);
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Result type alias for signing operations.
pub type SignResult<T> = Result<T, SignError>;

/// Result type alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
