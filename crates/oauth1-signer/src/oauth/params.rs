//! Parameter normalization and signature base string (RFC 5849 §3.4.1).

use super::encode::percent_encode;

/// Encode, sort and join parameters into the normalized parameter string.
///
/// Pairs are percent-encoded first, then ordered by encoded key and then by
/// encoded value, comparing bytes.
pub fn normalize_parameters<I, K, V>(parameters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded: Vec<(String, String)> =
        parameters.into_iter().map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref()))).collect();
    encoded.sort_unstable();

    encoded.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}

/// Build the signature base string.
///
/// Format: `METHOD&encoded_base_url&encoded_normalized_parameters`
#[must_use]
pub fn signature_base_string(method: &str, base_url: &str, normalized_parameters: &str) -> String {
    format!("{}&{}&{}", method.to_ascii_uppercase(), percent_encode(base_url), percent_encode(normalized_parameters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_key_then_value() {
        let params = [("b", "2"), ("a", "1"), ("a", "0")];
        assert_eq!(normalize_parameters(params), "a=0&a=1&b=2");
    }

    #[test]
    fn test_orders_on_encoded_bytes() {
        // Uppercase sorts before lowercase; a key sorts before its own extensions.
        let params = [("z", "x"), ("a b", "1"), ("Z", "y"), ("a", "1")];
        assert_eq!(normalize_parameters(params), "Z=y&a=1&a%20b=1&z=x");
    }

    #[test]
    fn test_empty_parameters() {
        assert_eq!(normalize_parameters(Vec::<(&str, &str)>::new()), "");
    }

    #[test]
    fn test_empty_values_kept() {
        assert_eq!(normalize_parameters([("flag", ""), ("a", "1")]), "a=1&flag=");
    }

    #[test]
    fn test_base_string_double_encodes_parameters() {
        let normalized = normalize_parameters([("status", "hi there")]);
        let base = signature_base_string("post", "https://example.com/api", &normalized);

        assert_eq!(base, "POST&https%3A%2F%2Fexample.com%2Fapi&status%3Dhi%2520there");
    }
}
