//! RFC 3986 percent-encoding as required by RFC 5849 §3.6.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{SignError, SignResult};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encode a string per RFC 3986.
///
/// Non-ASCII input is encoded over its UTF-8 bytes with uppercase hex digits.
/// Space becomes `%20`, never `+`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Reverse [`percent_encode`].
///
/// # Errors
///
/// Returns [`SignError::InvalidInput`] if the decoded bytes are not UTF-8.
pub fn percent_decode(input: &str) -> SignResult<String> {
    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| SignError::invalid_input("encoding", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_untouched() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
    }

    #[test]
    fn test_reserved_encoded() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("&"), "%26");
        assert_eq!(percent_encode("="), "%3D");
        assert_eq!(percent_encode("%"), "%25");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(percent_encode("!"), "%21");
    }

    #[test]
    fn test_utf8_uses_uppercase_hex() {
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_recovers_reserved() {
        let original = "a b&c=d%e+f";
        assert_eq!(percent_decode(&percent_encode(original)).unwrap(), original);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(percent_decode("%FF%FE").is_err());
    }
}
