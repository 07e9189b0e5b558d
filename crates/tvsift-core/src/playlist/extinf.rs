//! `#EXTINF` metadata line helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Marker that starts a metadata line.
pub const METADATA_PREFIX: &str = "#EXTINF";

static GROUP_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"group-title="([^"]*)""#).expect("valid group-title regex"));

/// Value of the `group-title="..."` attribute, if present.
pub fn group_title(line: &str) -> Option<&str> {
    GROUP_TITLE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Channel name: text after the last comma, trimmed. None if missing or empty.
pub fn display_name(line: &str) -> Option<&str> {
    line.rsplit_once(',')
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
}
