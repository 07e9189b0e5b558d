//! `tvsift parse <file>` – show the candidates a playlist yields.

use anyhow::{Context, Result};
use std::path::Path;
use tvsift_core::config::SiftConfig;
use tvsift_core::playlist;

pub fn run_parse(cfg: &SiftConfig, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read playlist: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let (candidates, report) = playlist::parse_document(&text, &cfg.denylists());

    if candidates.is_empty() {
        println!("No candidate links.");
    } else {
        println!("{:<32} {:<8} {}", "NAME", "HEADERS", "LINK");
        for c in &candidates {
            let headers = if c.directive.is_some() { "yes" } else { "-" };
            println!("{:<32} {:<8} {}", c.display_name(), headers, c.link);
        }
    }
    println!(
        "{} candidate(s); {} denied group(s), {} denied link(s), {} suppressed line(s)",
        candidates.len(),
        report.denied_groups,
        report.denied_links,
        report.suppressed_lines
    );
    Ok(())
}
