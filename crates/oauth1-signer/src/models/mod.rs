//! Wire models for the HTTP front-end.
//!
//! Request bodies reject unknown fields so typos surface as client errors
//! instead of silently unsigned parameters.

mod inputs;
mod outputs;

pub use inputs::{ParamScalar, ParamValue, SignRequest};
pub use outputs::{ErrorResponse, SignResponse};
