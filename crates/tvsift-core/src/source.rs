//! Playlist document fetching.
//!
//! One plain GET per source URL, redirects followed, body read fully into
//! memory. A failure here skips the source; it never aborts the run.

use std::time::Duration;

use crate::failure::NetError;
use crate::headers;

/// Documents larger than this are refused.
const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

/// Fetches the text of a playlist document.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, NetError>;
}

/// curl-backed fetcher.
#[derive(Debug, Clone, Copy)]
pub struct HttpFetcher {
    /// Overall timeout for one document download.
    pub timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, NetError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        easy.timeout(self.timeout)?;
        easy.accept_encoding("")?;
        easy.http_headers(crate::http::header_list(&headers::baseline())?)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() + data.len() > MAX_DOCUMENT_BYTES {
                    tracing::warn!("document exceeds {} bytes, aborting", MAX_DOCUMENT_BYTES);
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(NetError::Http(code));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
