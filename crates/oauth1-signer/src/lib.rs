//! OAuth 1.0a Signing Service
//!
//! Holds one set of OAuth 1.0a credentials (consumer key/secret and access
//! token/secret) and signs requests on behalf of callers that never see the
//! secrets.
//!
//! # Features
//!
//! - **RFC 5849 HMAC-SHA1**: bit-exact signature base string and header
//! - **Allow-listed targets**: only configured URL prefixes are signed
//! - **Rate-limited**: per-client GCRA quota on the signing endpoint
//! - **Hardened responses**: security headers, body limit, request timeout
//!
//! # Example
//!
//! ```no_run
//! use oauth1_signer::{config::Config, server::SignerServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     SignerServer::new(config).run_http(3000).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod oauth;
pub mod server;

pub use config::Config;
pub use error::{ApiError, ConfigError, SignError};
pub use oauth::{AuthorizationHeader, Credentials, Signer, SigningRequest, Token};
