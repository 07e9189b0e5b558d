//! Content probing.
//!
//! Streaming GET against the terminal URL. Only the first `PREFIX_BYTES` of
//! the body are read; the transfer is aborted from the write callback once
//! that much has arrived. Latency is the time until the final response
//! started (curl's start-transfer time minus time spent on redirects), not
//! the time to read the prefix.

mod signature;

use std::cell::RefCell;

use crate::failure::NetError;
use crate::headers::HeaderSet;
use crate::http::{self, RequestOptions};

pub use signature::{has_signature, SIGNATURES};

/// How much of the body is inspected for a playlist signature.
pub const PREFIX_BYTES: usize = 1024;

/// Result of one content probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub status: u32,
    pub signature_present: bool,
    /// Elapsed response time in seconds; 0 for non-200 responses.
    pub latency_secs: f64,
    /// URL that answered the GET after any redirects it followed.
    pub effective_url: Option<String>,
}

impl ProbeOutcome {
    /// Outcome for a 200 response with the given body prefix and latency.
    pub fn from_prefix(prefix: &[u8], latency_secs: f64) -> Self {
        Self {
            status: 200,
            signature_present: has_signature(prefix),
            latency_secs,
            effective_url: None,
        }
    }

    /// Outcome for a non-200 response.
    pub fn status_only(status: u32) -> Self {
        Self {
            status,
            signature_present: false,
            latency_secs: 0.0,
            effective_url: None,
        }
    }
}

/// GET `url` with `headers`, read up to `PREFIX_BYTES`, and look for a playlist signature.
///
/// Redirects on the GET itself are followed (bounded by `opts.max_redirects`).
pub fn probe(url: &str, headers: &HeaderSet, opts: &RequestOptions) -> Result<ProbeOutcome, NetError> {
    let prefix = RefCell::new(Vec::with_capacity(PREFIX_BYTES));
    let mut easy = curl::easy::Easy::new();
    http::prepare(&mut easy, url, headers, opts)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            let mut buf = prefix.borrow_mut();
            let take = PREFIX_BYTES.saturating_sub(buf.len()).min(data.len());
            buf.extend_from_slice(&data[..take]);
            if buf.len() >= PREFIX_BYTES {
                // Returning less than data.len() aborts the transfer.
                return Ok(0);
            }
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Err(e) = perform_result {
        let stopped_on_purpose = e.is_write_error() && prefix.borrow().len() >= PREFIX_BYTES;
        if !stopped_on_purpose {
            return Err(NetError::Transport(e));
        }
    }

    let status = easy.response_code()?;
    let mut outcome = if status == 200 {
        let latency = final_response_latency(
            easy.starttransfer_time()?.as_secs_f64(),
            easy.redirect_time()?.as_secs_f64(),
        );
        ProbeOutcome::from_prefix(&prefix.into_inner(), latency)
    } else {
        ProbeOutcome::status_only(status)
    };
    outcome.effective_url = easy.effective_url()?.map(str::to_string);
    Ok(outcome)
}

/// Start-transfer time counts from the first request; redirect hops are removed.
fn final_response_latency(starttransfer_secs: f64, redirect_secs: f64) -> f64 {
    (starttransfer_secs - redirect_secs).max(0.0)
}
