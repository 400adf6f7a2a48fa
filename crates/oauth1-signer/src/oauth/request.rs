//! Validated signing input.

use std::borrow::Cow;

use url::Url;

use crate::error::{SignError, SignResult};

/// Protocol parameter names the signer always supplies itself.
///
/// Caller parameters with one of these names are dropped before signing.
pub const RESERVED_PARAMETERS: &[&str] = &[
    "oauth_consumer_key",
    "oauth_nonce",
    "oauth_signature",
    "oauth_signature_method",
    "oauth_timestamp",
    "oauth_token",
    "oauth_version",
];

/// Returns true if `name` is a protocol parameter supplied by the signer.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PARAMETERS.contains(&name)
}

/// A request to be signed: method, absolute target URL and parameters.
///
/// Parameters form a multiset; the same key may appear several times and
/// order is irrelevant to the resulting signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    method: String,
    url: Url,
    parameters: Vec<(String, String)>,
}

impl SigningRequest {
    /// Validate and build a signing request.
    ///
    /// The method is upper-cased. The URL must be absolute `http` or `https`
    /// with a host.
    pub fn new<I, K, V>(method: &str, url: &str, parameters: I) -> SignResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let method = validate_method(method)?;
        let url = parse_target_url(url)?;
        let parameters = parameters.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        Ok(Self { method, url, parameters })
    }

    /// Upper-cased HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parsed target URL, including any query string.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Caller-supplied parameters, as given.
    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Base string URI per RFC 5849 §3.4.1.2.
    ///
    /// Lowercase scheme and host, port only when not the scheme default,
    /// path without query or fragment.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}://{}:{}{}", self.url.scheme(), host, port, self.url.path()),
            None => format!("{}://{}{}", self.url.scheme(), host, self.url.path()),
        }
    }

    /// Reserved protocol names the caller tried to supply, in body or query.
    pub fn reserved_collisions(&self) -> Vec<String> {
        self.all_parameters().filter(|(k, _)| is_reserved(k)).map(|(k, _)| k.into_owned()).collect()
    }

    /// Parameters that enter the signature: caller parameters plus URL query
    /// pairs, minus reserved protocol names.
    pub(crate) fn signature_parameters(&self) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
        self.all_parameters().filter(|(k, _)| !is_reserved(k))
    }

    fn all_parameters(&self) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
        self.parameters
            .iter()
            .map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str())))
            .chain(self.url.query_pairs())
    }
}

fn validate_method(method: &str) -> SignResult<String> {
    let method = method.trim();
    if method.is_empty() {
        return Err(SignError::invalid_input("method", "cannot be empty"));
    }
    if !method.bytes().all(is_token_char) {
        return Err(SignError::invalid_input("method", format!("'{method}' is not an HTTP method token")));
    }
    Ok(method.to_ascii_uppercase())
}

/// `tchar` from RFC 9110 §5.6.2.
const fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
    ) || b.is_ascii_alphanumeric()
}

fn parse_target_url(url: &str) -> SignResult<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SignError::invalid_input("url", "cannot be empty"));
    }

    let parsed = Url::parse(url).map_err(|e| SignError::invalid_input("url", format!("'{url}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SignError::invalid_input("url", format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(SignError::invalid_input("url", "missing host"));
    }

    Ok(parsed)
}
