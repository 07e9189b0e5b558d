//! Parse an `#EXTVLCOPT:` directive line into HTTP request headers.

use super::HeaderSet;

/// Marker that identifies a per-link header directive line.
pub const DIRECTIVE_PREFIX: &str = "#EXTVLCOPT:";

/// Options starting with this prefix map to a header named after the remainder.
const HTTP_OPTION_PREFIX: &str = "http-";

/// Parses a directive line such as `#EXTVLCOPT:http-user-agent=Foo http-referrer=https://x/`.
///
/// Total: tokens without `=` and options outside the `http-` family are
/// dropped, never reported. Values keep any `=` after the first.
pub fn parse_directive(line: &str) -> HeaderSet {
    let mut headers = HeaderSet::new();
    let line = line.trim();
    let content = line.strip_prefix(DIRECTIVE_PREFIX).unwrap_or(line);

    for option in content.split_whitespace() {
        let Some((key, value)) = option.split_once('=') else {
            continue;
        };
        if let Some(name) = header_name_for(key) {
            headers.insert(name, value.to_string());
        }
    }
    headers
}

/// Canonical header name for a directive option key, or None if the key is not a header.
fn header_name_for(key: &str) -> Option<String> {
    match key {
        "http-user-agent" => Some("User-Agent".to_string()),
        "http-referrer" | "http-referer" => Some("Referer".to_string()),
        "http-cookie" => Some("Cookie".to_string()),
        _ => {
            let rest = key.strip_prefix(HTTP_OPTION_PREFIX)?;
            let name = title_case_hyphenated(rest);
            (!name.is_empty()).then_some(name)
        }
    }
}

/// `x-forwarded-for` -> `X-Forwarded-For`, `x-api2key` -> `X-Api2Key`; empty words are dropped.
///
/// A letter is upper-cased when it does not follow another letter, so digits
/// also start a new word.
fn title_case_hyphenated(s: &str) -> String {
    s.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut out = String::with_capacity(w.len());
            let mut after_letter = false;
            for c in w.chars() {
                if after_letter {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                after_letter = c.is_alphabetic();
            }
            out
        })
        .collect::<Vec<_>>()
        .join("-")
}
