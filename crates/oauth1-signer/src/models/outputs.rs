//! Response bodies.

use serde::{Deserialize, Serialize};

/// Successful `POST /sign` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    /// Complete `Authorization` header value.
    pub authorization: String,
}

/// Error body returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}
