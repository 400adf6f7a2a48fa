//! Configuration for the OAuth 1.0a signing service.

use std::num::NonZeroU32;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::oauth::{Credentials, Token};

/// Environment variable names for the signing credentials.
pub mod env {
    /// Consumer (API) key.
    pub const CONSUMER_KEY: &str = "TWITTER_API_KEY";

    /// Consumer (API) secret.
    pub const CONSUMER_SECRET: &str = "TWITTER_API_SECRET";

    /// Access token.
    pub const ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";

    /// Access token secret.
    pub const ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";

    /// Comma-separated allow-listed URL prefixes.
    pub const ALLOWED_URL_PREFIXES: &str = "ALLOWED_URL_PREFIXES";
}

/// Front-end defaults.
pub mod defaults {
    use std::num::NonZeroU32;
    use std::time::Duration;

    /// HTTP listen port.
    pub const PORT: u16 = 3000;

    /// Target URL prefixes accepted when none are configured.
    pub const ALLOWED_URL_PREFIXES: &[&str] = &["https://api.twitter.com/", "https://api.x.com/"];

    /// Sustained requests per minute per client.
    pub const RATE_LIMIT_PER_MINUTE: NonZeroU32 = non_zero(60);

    /// Burst size per client.
    pub const RATE_LIMIT_BURST: NonZeroU32 = non_zero(10);

    /// Whole-request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum accepted request body.
    pub const MAX_BODY_BYTES: usize = 16 * 1024;

    /// Interval between rate limiter pruning passes.
    pub const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

    const fn non_zero(n: u32) -> NonZeroU32 {
        match NonZeroU32::new(n) {
            Some(n) => n,
            None => NonZeroU32::MIN,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Consumer key and secret.
    pub consumer: Credentials,

    /// Access token and secret.
    pub token: Token,

    /// Target URLs must start with one of these (normalized) prefixes.
    pub allowed_url_prefixes: Vec<Url>,

    /// Sustained requests per minute per client IP.
    pub rate_limit_per_minute: NonZeroU32,

    /// Requests a client may make back to back.
    pub rate_limit_burst: NonZeroU32,

    /// Use the first `X-Forwarded-For` entry as the client address.
    pub trust_forwarded_for: bool,

    /// Whole-request timeout.
    pub request_timeout: Duration,

    /// Maximum accepted request body.
    pub max_body_bytes: usize,
}

impl Config {
    /// Create a configuration with default front-end settings.
    #[must_use]
    pub fn new(consumer: Credentials, token: Token) -> Self {
        Self {
            consumer,
            token,
            allowed_url_prefixes: default_prefixes(),
            rate_limit_per_minute: defaults::RATE_LIMIT_PER_MINUTE,
            rate_limit_burst: defaults::RATE_LIMIT_BURST,
            trust_forwarded_for: false,
            request_timeout: defaults::REQUEST_TIMEOUT,
            max_body_bytes: defaults::MAX_BODY_BYTES,
        }
    }

    /// Create a test configuration with fixed dummy credentials.
    #[must_use]
    pub fn for_testing() -> Self {
        Self::new(
            Credentials::new("test-consumer-key", "test-consumer-secret"),
            Token::new("test-access-token", "test-access-secret"),
        )
    }

    /// Create configuration from environment variables.
    ///
    /// Fails fast, naming every missing credential variable at once.
    ///
    /// # Errors
    ///
    /// Returns error if a credential is absent or the prefix list is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns error if a credential is absent or the prefix list is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let names = [env::CONSUMER_KEY, env::CONSUMER_SECRET, env::ACCESS_TOKEN, env::ACCESS_SECRET];
        let values: Vec<Option<String>> =
            names.iter().map(|name| lookup(name).filter(|v| !v.trim().is_empty())).collect();

        let missing: Vec<&'static str> =
            names.iter().zip(&values).filter(|(_, v)| v.is_none()).map(|(name, _)| *name).collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let mut values = values.into_iter().flatten();
        let (Some(consumer_key), Some(consumer_secret), Some(access_token), Some(access_secret)) =
            (values.next(), values.next(), values.next(), values.next())
        else {
            return Err(ConfigError::MissingVars(names.to_vec()));
        };

        let mut config =
            Self::new(Credentials::new(consumer_key, consumer_secret), Token::new(access_token, access_secret));

        if let Some(prefixes) = lookup(env::ALLOWED_URL_PREFIXES).filter(|v| !v.trim().is_empty()) {
            config.allowed_url_prefixes = parse_prefixes(&prefixes)?;
        }

        Ok(config)
    }

    /// Replace the allow-listed prefixes.
    ///
    /// # Errors
    ///
    /// Returns error if any prefix is not an absolute `http(s)` URL.
    pub fn with_allowed_url_prefixes<I, S>(mut self, prefixes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_url_prefixes = prefixes.into_iter().map(|p| parse_prefix(p.as_ref())).collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Override the per-client rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, per_minute: NonZeroU32, burst: NonZeroU32) -> Self {
        self.rate_limit_per_minute = per_minute;
        self.rate_limit_burst = burst;
        self
    }
}

/// Parse a comma-separated prefix list.
///
/// # Errors
///
/// Returns error if the list is empty or an entry is not an absolute `http(s)` URL.
pub fn parse_prefixes(list: &str) -> Result<Vec<Url>, ConfigError> {
    let prefixes: Vec<Url> =
        list.split(',').map(str::trim).filter(|p| !p.is_empty()).map(parse_prefix).collect::<Result<_, _>>()?;

    if prefixes.is_empty() {
        return Err(ConfigError::invalid_value(env::ALLOWED_URL_PREFIXES, "no prefixes given"));
    }
    Ok(prefixes)
}

fn parse_prefix(prefix: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(prefix)
        .map_err(|e| ConfigError::invalid_value(env::ALLOWED_URL_PREFIXES, format!("'{prefix}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::invalid_value(env::ALLOWED_URL_PREFIXES, format!("'{prefix}' is not an http(s) URL")));
    }
    Ok(url)
}

fn default_prefixes() -> Vec<Url> {
    defaults::ALLOWED_URL_PREFIXES.iter().filter_map(|p| Url::parse(p).ok()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    const ALL: &[(&str, &str)] = &[
        (env::CONSUMER_KEY, "ck"),
        (env::CONSUMER_SECRET, "cs"),
        (env::ACCESS_TOKEN, "tk"),
        (env::ACCESS_SECRET, "ts"),
    ];

    #[test]
    fn test_config_from_complete_environment() {
        let config = Config::from_lookup(lookup(ALL)).unwrap();
        assert_eq!(config.consumer.key(), "ck");
        assert_eq!(config.token.key(), "tk");
        assert_eq!(config.allowed_url_prefixes.len(), defaults::ALLOWED_URL_PREFIXES.len());
        assert_eq!(config.rate_limit_per_minute.get(), 60);
        assert_eq!(config.rate_limit_burst.get(), 10);
    }

    #[test]
    fn test_config_reports_all_missing_vars() {
        let err = Config::from_lookup(lookup(&[(env::CONSUMER_KEY, "ck"), (env::ACCESS_TOKEN, "  ")])).unwrap_err();
        match err {
            ConfigError::MissingVars(names) => {
                assert_eq!(names, vec![env::CONSUMER_SECRET, env::ACCESS_TOKEN, env::ACCESS_SECRET]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_custom_prefixes() {
        let mut vars = ALL.to_vec();
        vars.push((env::ALLOWED_URL_PREFIXES, "https://api.example.com/1/, https://upload.example.com"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        let prefixes: Vec<&str> = config.allowed_url_prefixes.iter().map(Url::as_str).collect();
        assert_eq!(prefixes, vec!["https://api.example.com/1/", "https://upload.example.com/"]);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        assert!(parse_prefixes("api.example.com").is_err());
        assert!(parse_prefixes("ftp://files.example.com/").is_err());
        assert!(parse_prefixes(" , ").is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup(&[
            (env::CONSUMER_KEY, "ck"),
            (env::CONSUMER_SECRET, "very-secret-consumer"),
            (env::ACCESS_TOKEN, "tk"),
            (env::ACCESS_SECRET, "very-secret-token"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
    }
}
