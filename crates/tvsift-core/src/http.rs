//! Shared curl request settings.

use std::time::Duration;

use crate::headers::HeaderSet;

/// Per-request limits applied to every trace hop and probe.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Hard wall-clock timeout for a single request.
    pub timeout: Duration,
    /// Maximum redirect hops followed before giving up.
    pub max_redirects: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 10,
        }
    }
}

/// Build a curl header list ("Name: value") from a header set.
pub(crate) fn header_list(headers: &HeaderSet) -> Result<curl::easy::List, curl::Error> {
    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    Ok(list)
}

/// Apply URL, timeout and custom headers to a fresh handle.
pub(crate) fn prepare(
    easy: &mut curl::easy::Easy,
    url: &str,
    headers: &HeaderSet,
    opts: &RequestOptions,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.timeout(opts.timeout)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }
    Ok(())
}
