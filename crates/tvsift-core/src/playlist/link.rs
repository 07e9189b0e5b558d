//! Stream link recognition.

/// URL schemes recognized as stream links.
pub const LINK_SCHEMES: [&str; 3] = ["http://", "https://", "rtmp://"];

/// True if the line is a stream link.
pub fn is_link(line: &str) -> bool {
    LINK_SCHEMES.iter().any(|s| line.starts_with(s))
}

/// Authority of a link: text after `://` up to the first `/`, `?` or `#`.
/// None when there is no scheme separator or the authority is empty.
pub fn link_authority(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    (!authority.is_empty()).then_some(authority)
}
