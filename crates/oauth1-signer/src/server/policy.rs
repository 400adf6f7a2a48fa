//! Target URL allow-list.

use url::Url;

/// Accepts target URLs that start with one of a set of prefixes.
///
/// Matching is done on the parsed, normalized form of the target, so case in
/// scheme or host, default ports and userinfo tricks cannot slip past a prefix.
/// A prefix whose path does not end in `/` only matches whole path segments:
/// `https://api.example.com/1` allows `/1` and `/1/x` but not `/1evil`.
#[derive(Debug, Clone)]
pub struct UrlAllowList {
    prefixes: Vec<String>,
}

impl UrlAllowList {
    /// Create an allow-list from normalized prefix URLs.
    #[must_use]
    pub fn new(prefixes: &[Url]) -> Self {
        Self { prefixes: prefixes.iter().map(|p| p.as_str().to_string()).collect() }
    }

    /// Check a parsed target URL.
    #[must_use]
    pub fn allows(&self, target: &Url) -> bool {
        if !target.username().is_empty() || target.password().is_some() {
            return false;
        }
        let target = target.as_str();
        self.prefixes.iter().any(|prefix| matches_prefix(target, prefix))
    }

    /// Check a raw target URL. Unparseable URLs are never allowed.
    #[must_use]
    pub fn allows_str(&self, target: &str) -> bool {
        Url::parse(target.trim()).is_ok_and(|url| self.allows(&url))
    }

    /// Number of configured prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// True when nothing is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn matches_prefix(target: &str, prefix: &str) -> bool {
    match target.strip_prefix(prefix) {
        Some(rest) => prefix.ends_with('/') || rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}
