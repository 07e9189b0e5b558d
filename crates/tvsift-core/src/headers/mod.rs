//! Request header resolution for a single link.
//!
//! A link may be preceded by an `#EXTVLCOPT:` directive carrying player
//! options such as `http-user-agent=...`. Those are mapped to HTTP request
//! headers and merged over a fixed browser-like baseline; directive entries
//! win on key collision.

mod directive;

use std::collections::HashMap;

pub use directive::{parse_directive, DIRECTIVE_PREFIX};

/// Resolved request headers for one link (header name -> value).
pub type HeaderSet = HashMap<String, String>;

/// Headers sent with every request unless the directive overrides them.
const BASELINE: [(&str, &str); 4] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    ),
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Connection", "keep-alive"),
];

/// The fixed baseline header set.
pub fn baseline() -> HeaderSet {
    BASELINE
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Resolve the full header set for a link: baseline, then directive entries on top.
pub fn resolve(directive: Option<&str>) -> HeaderSet {
    let mut headers = baseline();
    if let Some(line) = directive {
        headers.extend(parse_directive(line));
    }
    headers
}
