//! HMAC-SHA1 signature computation (RFC 5849 §3.4.2).

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::encode::percent_encode;
use crate::error::{SignError, SignResult};

type HmacSha1 = Hmac<Sha1>;

/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Build the signing key: `encoded_consumer_secret&encoded_token_secret`.
#[must_use]
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret))
}

/// HMAC-SHA1 the base string with `key` and return the base64-encoded digest.
pub fn hmac_sha1_base64(key: &str, base_string: &str) -> SignResult<String> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| SignError::signing_failure(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_encodes_both_halves() {
        assert_eq!(signing_key("secret1", "secret2"), "secret1&secret2");
        assert_eq!(signing_key("a&b", "c d"), "a%26b&c%20d");
        assert_eq!(signing_key("secret1", ""), "secret1&");
    }

    #[test]
    fn test_hmac_sha1_rfc2202_vector() {
        // RFC 2202 test case 2
        let digest = hmac_sha1_base64("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(digest, "7/zfauXrL6LSdBbV8YTfnCWafHk=");
    }

    #[test]
    fn test_empty_key_is_accepted() {
        assert!(hmac_sha1_base64("", "base").is_ok());
    }
}
