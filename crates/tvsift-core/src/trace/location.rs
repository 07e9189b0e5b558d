//! Resolve a redirect `Location` value.

/// Resolve `location` for the next hop.
///
/// Absolute-path values (`/live/index.m3u8`, `//cdn/x`) are joined onto the
/// original seed URL. Anything else is used verbatim.
pub fn resolve_location(seed: &str, location: &str) -> String {
    if !location.starts_with('/') {
        return location.to_string();
    }
    url::Url::parse(seed)
        .and_then(|base| base.join(location))
        .map(String::from)
        .unwrap_or_else(|_| location.to_string())
}
