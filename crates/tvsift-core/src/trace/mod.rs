//! Redirect tracing.
//!
//! Issues HEAD requests with automatic redirect following disabled and walks
//! `Location` headers by hand, up to `max_redirects` hops. The three ways a
//! trace can stop (non-redirect status, redirect without `Location`, hop bound)
//! all yield the URL reached so far; they differ only in `TraceStop` for logs.

mod location;
mod parse;

use std::str;

use crate::failure::NetError;
use crate::headers::HeaderSet;
use crate::http::{self, RequestOptions};

pub use location::resolve_location;
pub(crate) use parse::find_location;

/// Status codes treated as redirects.
pub const REDIRECT_STATUSES: [u32; 5] = [301, 302, 303, 307, 308];

/// Why tracing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStop {
    /// Server answered with a non-redirect status.
    Terminal(u32),
    /// Redirect status without a `Location` header.
    MissingLocation(u32),
    /// `max_redirects` hops were followed.
    HopLimit,
}

/// Terminal URL of a redirect trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOutcome {
    pub url: String,
    pub hops: u32,
    pub stop: TraceStop,
}

/// Single HEAD response as seen by the tracer.
struct HeadResponse {
    status: u32,
    location: Option<String>,
}

/// Follow redirects from `seed` and return the URL reached.
///
/// Absolute-path `Location` values are resolved against `seed`, not against
/// the current hop. Any transport failure ends the trace with an error.
pub fn trace_redirects(
    seed: &str,
    headers: &HeaderSet,
    opts: &RequestOptions,
) -> Result<TraceOutcome, NetError> {
    if url::Url::parse(seed).is_err() {
        return Err(NetError::InvalidUrl(seed.to_string()));
    }

    let mut current = seed.to_string();
    let mut hops = 0u32;
    while hops < opts.max_redirects {
        let resp = head(&current, headers, opts)?;
        if !REDIRECT_STATUSES.contains(&resp.status) {
            return Ok(TraceOutcome {
                url: current,
                hops,
                stop: TraceStop::Terminal(resp.status),
            });
        }
        let Some(location) = resp.location else {
            tracing::debug!(url = %current, status = resp.status, "redirect without Location");
            return Ok(TraceOutcome {
                url: current,
                hops,
                stop: TraceStop::MissingLocation(resp.status),
            });
        };
        hops += 1;
        current = resolve_location(seed, &location);
        tracing::debug!(hop = hops, url = %current, "redirect");
    }

    tracing::debug!(url = %current, hops, "redirect bound reached");
    Ok(TraceOutcome {
        url: current,
        hops,
        stop: TraceStop::HopLimit,
    })
}

/// One HEAD request without following redirects.
fn head(url: &str, headers: &HeaderSet, opts: &RequestOptions) -> Result<HeadResponse, NetError> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    http::prepare(&mut easy, url, headers, opts)?;
    easy.nobody(true)?;
    easy.follow_location(false)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(HeadResponse {
        status,
        location: find_location(&lines),
    })
}
