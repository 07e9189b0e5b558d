//! Classify network failures into coarse kinds for logs and summaries.

use std::fmt;

use super::NetError;

/// High-level kind of a network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operation timed out (connect or overall).
    Timeout,
    /// Network-level failure (refused, reset, DNS, empty reply).
    Connection,
    /// Server answered with an unaccepted status.
    Http(u32),
    /// Anything else (bad URL, unsupported protocol, ...).
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connection => write!(f, "connection"),
            FailureKind::Http(code) => write!(f, "HTTP {}", code),
            FailureKind::Other => write!(f, "other"),
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify a network error into a FailureKind.
pub fn classify(e: &NetError) -> FailureKind {
    match e {
        NetError::Transport(ce) => classify_curl_error(ce),
        NetError::Http(code) => FailureKind::Http(*code),
        NetError::InvalidUrl(_) => FailureKind::Other,
    }
}
