//! Input model for `POST /sign`.

use std::collections::BTreeMap;
use std::num::FpCategory;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::oauth::SigningRequest;

/// Body of a signing request.
///
/// ```json
/// { "method": "POST", "url": "https://api.twitter.com/2/tweets", "params": { "a": "1" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignRequest {
    /// HTTP method of the request being signed.
    #[serde(default)]
    pub method: Option<String>,

    /// Absolute target URL, optionally with a query string.
    #[serde(default)]
    pub url: Option<String>,

    /// Query or form parameters that take part in the signature.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// A parameter value: one scalar or a list of scalars for repeated keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Single value.
    One(ParamScalar),
    /// Same key repeated once per element.
    Many(Vec<ParamScalar>),
}

/// Scalar parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamScalar {
    /// String value.
    Text(String),
    /// Numeric value.
    Number(serde_json::Number),
    /// Boolean value.
    Bool(bool),
}

/// Magnitudes a JavaScript client renders without an exponent.
const PLAIN_NUMBER_RANGE: std::ops::Range<f64> = 1e-6..1e21;

impl ParamScalar {
    /// Text that enters the signature for this value.
    ///
    /// Numbers are rendered the way a JavaScript client sends them (`1.0` and
    /// `1e2` become `1` and `100`), so the signed text matches the wire text.
    /// Returns `None` for numbers that have no such plain rendering.
    #[must_use]
    pub fn signing_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => number_text(n),
        }
    }
}

fn number_text(n: &serde_json::Number) -> Option<String> {
    if n.is_i64() || n.is_u64() {
        return Some(n.to_string());
    }

    let value = n.as_f64()?;
    match value.abs() {
        m if m.classify() == FpCategory::Zero => Some("0".to_string()),
        m if PLAIN_NUMBER_RANGE.contains(&m) => Some(value.to_string()),
        _ => None,
    }
}

impl SignRequest {
    /// Method and URL, rejecting absent or blank values.
    pub fn required_fields(&self) -> ApiResult<(&str, &str)> {
        let method = self.method.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (method, url) {
            (Some(method), Some(url)) => Ok((method, url)),
            _ => Err(ApiError::MissingFields),
        }
    }

    /// Parameters flattened to `(key, value)` pairs, repeated keys expanded.
    ///
    /// Fails on a number that cannot be signed unambiguously.
    pub fn flat_params(&self) -> ApiResult<Vec<(String, String)>> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            let scalars = match value {
                ParamValue::One(v) => std::slice::from_ref(v),
                ParamValue::Many(vs) => vs.as_slice(),
            };
            for scalar in scalars {
                let text = scalar.signing_text().ok_or_else(|| {
                    ApiError::malformed_body(format!("parameter '{key}' has a number that must be sent as a string"))
                })?;
                pairs.push((key.clone(), text));
            }
        }
        Ok(pairs)
    }

    /// Validate into an engine request.
    pub fn to_signing_request(&self) -> ApiResult<SigningRequest> {
        let (method, url) = self.required_fields()?;
        let params = self.flat_params()?;
        Ok(SigningRequest::new(method, url, params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_request() {
        let req: SignRequest = serde_json::from_value(json!({
            "method": "POST",
            "url": "https://api.twitter.com/2/tweets",
            "params": {"status": "hello", "ids": ["2", "1"], "count": 5, "trim": true}
        }))
        .unwrap();

        let mut params = req.flat_params().unwrap();
        params.sort();
        assert_eq!(
            params,
            vec![
                ("count".to_string(), "5".to_string()),
                ("ids".to_string(), "1".to_string()),
                ("ids".to_string(), "2".to_string()),
                ("status".to_string(), "hello".to_string()),
                ("trim".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_float_params_signed_as_client_text() {
        let params = serde_json::from_str(r#"{"a": 1.0, "b": 1e2, "c": 10, "d": 2.5, "e": -0.0, "f": -3}"#).unwrap();
        let req = SignRequest { params, ..Default::default() };

        assert_eq!(
            req.flat_params().unwrap(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "100".to_string()),
                ("c".to_string(), "10".to_string()),
                ("d".to_string(), "2.5".to_string()),
                ("e".to_string(), "0".to_string()),
                ("f".to_string(), "-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_without_plain_text_rejected() {
        for literal in ["1e21", "1e-7", "-4.5e300"] {
            let body = format!(r#"{{"method": "GET", "url": "https://x.test/", "params": {{"n": {literal}}}}}"#);
            let req: SignRequest = serde_json::from_str(&body).unwrap();
            assert!(matches!(req.flat_params(), Err(ApiError::MalformedBody(_))), "{literal}");
            assert!(matches!(req.to_signing_request(), Err(ApiError::MalformedBody(_))), "{literal}");
        }
    }

    #[test]
    fn test_params_default_to_empty() {
        let req: SignRequest = serde_json::from_value(json!({"method": "GET", "url": "https://x.test/"})).unwrap();
        assert!(req.params.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_value::<SignRequest>(json!({
            "method": "GET",
            "url": "https://x.test/",
            "data": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_param_rejected() {
        let result = serde_json::from_value::<SignRequest>(json!({
            "method": "GET",
            "url": "https://x.test/",
            "params": {"a": null}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields() {
        let req = SignRequest { method: Some("GET".into()), ..Default::default() };
        assert!(matches!(req.required_fields(), Err(ApiError::MissingFields)));

        let req = SignRequest { method: Some("  ".into()), url: Some("https://x.test/".into()), ..Default::default() };
        assert!(matches!(req.required_fields(), Err(ApiError::MissingFields)));
    }

    #[test]
    fn test_invalid_url_maps_to_sign_error() {
        let req = SignRequest { method: Some("GET".into()), url: Some("not a url".into()), ..Default::default() };
        assert!(matches!(req.to_signing_request(), Err(ApiError::Sign(_))));
    }
}
