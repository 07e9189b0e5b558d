//! Pick the `Location` header out of collected response header lines.

/// Last non-empty `Location` value in `lines`, if any.
pub(crate) fn find_location(lines: &[String]) -> Option<String> {
    let mut location = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") {
                let value = value.trim();
                if !value.is_empty() {
                    location = Some(value.to_string());
                }
            }
        }
    }
    location
}
