//! `tvsift check <url>` – validate one link.

use anyhow::{Context, Result};
use tvsift_core::config::SiftConfig;
use tvsift_core::validator::LinkValidator;

pub async fn run_check(cfg: &SiftConfig, url: &str, directive: Option<&str>) -> Result<()> {
    let validator = LinkValidator::new(cfg.validator_options());
    let result = tokio::task::spawn_blocking({
        let url = url.to_string();
        let directive = directive.map(String::from);
        move || validator.validate(&url, directive.as_deref())
    })
    .await
    .context("check task join")?;

    println!("Verdict:   {}", result.verdict);
    println!("Final URL: {}", result.final_url);
    println!("Latency:   {:.2}s", result.latency_secs);
    if !result.accepted() {
        anyhow::bail!("link rejected: {}", result.verdict);
    }
    Ok(())
}
