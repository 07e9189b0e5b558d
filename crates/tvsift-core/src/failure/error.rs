//! Error type returned by every network operation.

/// Failure of a single HTTP operation.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Curl reported an error (DNS, connect, timeout, reset, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Response had a status the caller does not accept.
    #[error("HTTP {0}")]
    Http(u32),
    /// The URL could not be handed to curl at all.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
