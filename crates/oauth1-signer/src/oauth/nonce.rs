//! Per-request nonce and timestamp generation.

use chrono::Utc;
use uuid::Uuid;

/// Generate a fresh nonce: 32 lowercase hex characters from a v4 UUID.
///
/// The alphabet never needs percent-encoding.
#[must_use]
pub fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current Unix time in whole seconds.
#[must_use]
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
