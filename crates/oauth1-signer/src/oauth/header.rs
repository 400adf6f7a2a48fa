//! `Authorization: OAuth ...` header assembly (RFC 5849 §3.5.1).

use std::fmt;

use super::encode::percent_encode;
use super::signature::SIGNATURE_METHOD;

/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// A computed OAuth 1.0a authorization value.
///
/// Renders via [`fmt::Display`] as
/// `OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...",
/// oauth_signature_method="HMAC-SHA1", oauth_timestamp="...", oauth_token="...",
/// oauth_version="1.0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    consumer_key: String,
    nonce: String,
    signature: String,
    timestamp: i64,
    token: String,
}

impl AuthorizationHeader {
    pub(crate) fn new(consumer_key: &str, nonce: &str, signature: String, timestamp: i64, token: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            nonce: nonce.to_string(),
            signature,
            timestamp,
            token: token.to_string(),
        }
    }

    /// Base64 signature before header encoding.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Nonce used for this signature.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Unix timestamp used for this signature.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Protocol parameters in header order.
    #[must_use]
    pub fn parameters(&self) -> [(&'static str, String); 7] {
        [
            ("oauth_consumer_key", self.consumer_key.clone()),
            ("oauth_nonce", self.nonce.clone()),
            ("oauth_signature", self.signature.clone()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", self.timestamp.to_string()),
            ("oauth_token", self.token.clone()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            self.parameters().iter().map(|(name, value)| format!("{name}=\"{}\"", percent_encode(value))).collect();
        write!(f, "OAuth {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order_and_encoding() {
        let header = AuthorizationHeader::new("ck", "n0nce", "ab+c/d=".to_string(), 1_700_000_000, "tk");

        assert_eq!(
            header.to_string(),
            "OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"n0nce\", oauth_signature=\"ab%2Bc%2Fd%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", oauth_token=\"tk\", \
             oauth_version=\"1.0\""
        );
    }
}
