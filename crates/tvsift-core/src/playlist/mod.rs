//! Playlist parsing into validation candidates.
//!
//! Walks the document line by line tracking the active group and a pending
//! `#EXTVLCOPT:` directive. Denied groups suppress everything up to the next
//! metadata line with an allowed group; links on denied domains are dropped.
//! The whole document is parsed before any validation starts.

mod denylist;
mod extinf;
mod link;

pub use denylist::{Denylists, DEFAULT_DOMAIN_DENYLIST, DEFAULT_GROUP_DENYLIST};
pub use extinf::{display_name, group_title, METADATA_PREFIX};
pub use link::{is_link, link_authority, LINK_SCHEMES};

use crate::headers::DIRECTIVE_PREFIX;

/// One (metadata, optional directive, link) triple awaiting validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The `#EXTINF` line, verbatim (trimmed).
    pub metadata: String,
    /// The `#EXTVLCOPT:` line preceding the link, if any.
    pub directive: Option<String>,
    pub link: String,
}

impl Candidate {
    /// Channel name from the metadata line, for logs.
    pub fn display_name(&self) -> &str {
        display_name(&self.metadata).unwrap_or(&self.link)
    }
}

/// Counters collected while parsing (telemetry only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Metadata lines whose group was on the denylist.
    pub denied_groups: usize,
    /// Link lines dropped for a denied (or missing) authority.
    pub denied_links: usize,
    /// Directive and link lines ignored while a group was suppressed.
    pub suppressed_lines: usize,
}

/// Parse a full playlist document into candidates.
pub fn parse_document(text: &str, denylists: &Denylists) -> (Vec<Candidate>, ParseReport) {
    let mut candidates = Vec::new();
    let mut report = ParseReport::default();
    let mut metadata = String::new();
    let mut current_group = String::new();
    let mut pending_directive: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.starts_with(METADATA_PREFIX) {
            metadata = line.to_string();
            if let Some(group) = group_title(line) {
                current_group = group.to_string();
            }
            if denylists.group_denied(&current_group) {
                tracing::debug!(group = %current_group, "group filtered");
                report.denied_groups += 1;
                current_group.clear();
            }
            continue;
        }

        let is_directive = line.starts_with(DIRECTIVE_PREFIX);
        let is_link_line = is_link(line);
        if !is_directive && !is_link_line {
            continue;
        }
        if current_group.is_empty() {
            report.suppressed_lines += 1;
            continue;
        }

        if is_directive {
            pending_directive = Some(line.to_string());
            continue;
        }

        let directive = pending_directive.take();
        match link_authority(line) {
            Some(authority) if !denylists.domain_denied(authority) => {
                candidates.push(Candidate {
                    metadata: metadata.clone(),
                    directive,
                    link: line.to_string(),
                });
            }
            authority => {
                tracing::debug!(link = line, authority = ?authority, "link domain filtered");
                report.denied_links += 1;
            }
        }
    }

    (candidates, report)
}
