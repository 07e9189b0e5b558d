//! Static exclusion sets applied during parsing.

use std::collections::HashSet;

/// Groups skipped by default.
pub const DEFAULT_GROUP_DENYLIST: [&str; 4] = ["Hong Kong", "Taiwan", "China", "Information"];

/// Hosts whose links are never validated by default.
pub const DEFAULT_DOMAIN_DENYLIST: [&str; 3] = ["sc2022.stream-link.org", "39.134.24.162", "epg.pw"];

/// Group and domain denylists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylists {
    groups: HashSet<String>,
    domains: HashSet<String>,
}

impl Default for Denylists {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_DENYLIST, DEFAULT_DOMAIN_DENYLIST)
    }
}

impl Denylists {
    pub fn new<G, D>(groups: G, domains: D) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            domains: domains
                .into_iter()
                .map(|d| d.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Exact, case-sensitive group match.
    pub fn group_denied(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Matches the full authority (`host:port`) or the host alone, ignoring ASCII case.
    pub fn domain_denied(&self, authority: &str) -> bool {
        let authority = authority.to_ascii_lowercase();
        if self.domains.contains(&authority) {
            return true;
        }
        let host = authority
            .rsplit_once('@')
            .map_or(authority.as_str(), |(_, h)| h);
        let host = strip_port(host);
        self.domains.contains(host)
    }
}

/// `host:8080` -> `host`; leaves bracketed IPv6 literals intact apart from the port.
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return authority
            .find(']')
            .map_or(authority, |end| &authority[..=end]);
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}
