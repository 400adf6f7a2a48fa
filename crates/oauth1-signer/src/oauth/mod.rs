//! OAuth 1.0a HMAC-SHA1 request signing (RFC 5849 §3).
//!
//! The [`Signer`] holds the consumer credentials and access token for the
//! lifetime of the process. It never mutates after construction, so one
//! instance can be shared across threads without locking.
//!
//! ```
//! use oauth1_signer::oauth::{Credentials, Signer, SigningRequest, Token};
//!
//! let signer = Signer::new(Credentials::new("ck", "cs"), Token::new("tk", "ts"));
//! let request = SigningRequest::new("POST", "https://api.twitter.com/2/tweets", [("a", "1")])?;
//! let header = signer.sign(&request)?;
//! assert!(header.to_string().starts_with("OAuth oauth_consumer_key=\"ck\""));
//! # Ok::<(), oauth1_signer::SignError>(())
//! ```

mod credentials;
mod encode;
mod header;
mod nonce;
mod params;
mod request;
mod signature;

pub use credentials::{Credentials, Token};
pub use encode::{percent_decode, percent_encode};
pub use header::{AuthorizationHeader, OAUTH_VERSION};
pub use nonce::{current_timestamp, generate_nonce};
pub use params::{normalize_parameters, signature_base_string};
pub use request::{RESERVED_PARAMETERS, SigningRequest, is_reserved};
pub use signature::{SIGNATURE_METHOD, hmac_sha1_base64, signing_key};

use std::borrow::Cow;

use crate::error::{SignError, SignResult};

/// Signs requests with a fixed consumer and access token.
#[derive(Debug, Clone)]
pub struct Signer {
    consumer: Credentials,
    token: Token,
}

impl Signer {
    /// Create a signer for one consumer and access token.
    #[must_use]
    pub fn new(consumer: Credentials, token: Token) -> Self {
        Self { consumer, token }
    }

    /// Consumer key this signer advertises.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        self.consumer.key()
    }

    /// Sign with a fresh nonce and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::SigningFailure`] if the HMAC primitive fails.
    pub fn sign(&self, request: &SigningRequest) -> SignResult<AuthorizationHeader> {
        self.sign_at(request, &generate_nonce(), current_timestamp())
    }

    /// Sign with an explicit nonce and timestamp.
    ///
    /// Identical inputs always produce the identical header.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidInput`] for an empty nonce or a negative
    /// timestamp, and [`SignError::SigningFailure`] if the HMAC primitive fails.
    pub fn sign_at(&self, request: &SigningRequest, nonce: &str, timestamp: i64) -> SignResult<AuthorizationHeader> {
        let base_string = self.base_string(request, nonce, timestamp)?;
        let key = signing_key(self.consumer.secret(), self.token.secret());
        let signature = hmac_sha1_base64(&key, &base_string)?;

        Ok(AuthorizationHeader::new(self.consumer.key(), nonce, signature, timestamp, self.token.key()))
    }

    /// Signature base string for `request` with the given nonce and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidInput`] for an empty nonce or a negative timestamp.
    pub fn base_string(&self, request: &SigningRequest, nonce: &str, timestamp: i64) -> SignResult<String> {
        if nonce.is_empty() {
            return Err(SignError::invalid_input("nonce", "cannot be empty"));
        }
        if timestamp < 0 {
            return Err(SignError::invalid_input("timestamp", "cannot be negative"));
        }

        let timestamp = timestamp.to_string();
        let protocol = [
            ("oauth_consumer_key", self.consumer.key()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.token.key()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let protocol = protocol.into_iter().map(|(k, v)| (Cow::Borrowed(k), Cow::Borrowed(v)));
        let normalized = normalize_parameters(protocol.chain(request.signature_parameters()));

        Ok(signature_base_string(request.method(), &request.base_url(), &normalized))
    }
}
