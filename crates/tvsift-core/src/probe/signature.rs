//! Playlist signature detection.

/// Literal markers that identify a playlist payload.
pub const SIGNATURES: [&str; 2] = ["#EXTM3U", "#EXTINF"];

/// True if the (possibly truncated, possibly non-UTF-8) prefix contains a signature.
pub fn has_signature(prefix: &[u8]) -> bool {
    let text = String::from_utf8_lossy(prefix);
    SIGNATURES.iter().any(|s| text.contains(s))
}
