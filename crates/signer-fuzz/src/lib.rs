//! Fuzzing library for oauth1-signer.
//!
//! This crate provides fuzzing targets for request body parsing,
//! percent-encoding and the signing engine.
//!
//! # Usage
//!
//! ```bash
//! cd crates/signer-fuzz
//! cargo +nightly fuzz run fuzz_sign_request -- -max_total_time=60
//! ```

pub use oauth1_signer::{models, oauth};
