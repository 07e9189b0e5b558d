//! Failure taxonomy for network operations.
//!
//! Every network call (trace hop, content probe, document fetch) returns
//! `Result<_, NetError>` instead of unwinding. The validator reduces these to a
//! rejected result; `classify` gives a coarse kind for telemetry.

mod classify;
mod error;

pub use classify::{classify, classify_curl_error, FailureKind};
pub use error::NetError;
