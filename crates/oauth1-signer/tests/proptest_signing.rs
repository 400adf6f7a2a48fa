//! Property-based tests for encoding, normalization and determinism.

use proptest::prelude::*;

use oauth1_signer::oauth::{
    Credentials, Signer, SigningRequest, Token, normalize_parameters, percent_decode, percent_encode,
};

fn signer() -> Signer {
    Signer::new(Credentials::new("ck", "cs"), Token::new("tk", "ts"))
}

fn arb_params() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(("[a-z_]{1,8}", "\\PC{0,16}"), 0..8)
}

proptest! {
    /// Encoding then decoding recovers any string.
    #[test]
    fn percent_encoding_roundtrip(input in "\\PC*") {
        let encoded = percent_encode(&input);
        prop_assert_eq!(percent_decode(&encoded).unwrap(), input);
    }

    /// Encoded output only uses unreserved characters and `%XX` escapes.
    #[test]
    fn percent_encoding_alphabet(input in "\\PC*") {
        let encoded = percent_encode(&input);
        prop_assert!(!encoded.contains('+'));
        prop_assert!(!encoded.contains(' '));
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '%')));
    }

    /// Normalization does not depend on input order.
    #[test]
    fn normalization_order_independent(params in arb_params()) {
        let mut reversed = params.clone();
        reversed.reverse();
        prop_assert_eq!(normalize_parameters(params), normalize_parameters(reversed));
    }

    /// Same nonce and timestamp always give the same header.
    #[test]
    fn signing_deterministic(
        params in arb_params(),
        nonce in "[a-f0-9]{32}",
        timestamp in 0i64..4_000_000_000,
    ) {
        let request = SigningRequest::new("POST", "https://api.example.com/1/update", params).unwrap();
        let first = signer().sign_at(&request, &nonce, timestamp).unwrap();
        let second = signer().sign_at(&request, &nonce, timestamp).unwrap();
        prop_assert_eq!(first.to_string(), second.to_string());
    }

    /// The encoded signature never leaks raw base64 punctuation into the header.
    #[test]
    fn header_signature_is_encoded(params in arb_params()) {
        let request = SigningRequest::new("GET", "https://api.example.com/", params).unwrap();
        let header = signer().sign(&request).unwrap().to_string();

        let start = header.find("oauth_signature=\"").unwrap() + "oauth_signature=\"".len();
        let value = &header[start..start + header[start..].find('"').unwrap()];
        prop_assert!(!value.contains('+') && !value.contains('/') && !value.contains('='));
    }
}
