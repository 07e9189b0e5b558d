//! `tvsift run` – process every configured source into the output playlist.

use anyhow::{Context, Result};
use std::time::Instant;
use tvsift_core::config::SiftConfig;
use tvsift_core::scheduler::{self, ProgressStats, SourceStatus};
use tvsift_core::source::HttpFetcher;
use tvsift_core::storage::OutputSink;
use tvsift_core::validator::LinkValidator;

const PROGRESS_INTERVAL_MS: u64 = 500;

pub async fn run_sift(cfg: SiftConfig) -> Result<()> {
    cfg.validate()?;

    // Truncated once here, even with no sources; every source appends to the same file.
    let sink = OutputSink::create(&cfg.output_path)?;
    tracing::info!(path = %cfg.output_path.display(), "output playlist truncated");
    if cfg.sources.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<ProgressStats>(64);
    let progress_handle = tokio::spawn(async move {
        let mut last_print = Instant::now();
        while let Some(stats) = progress_rx.recv().await {
            let now = Instant::now();
            if now.duration_since(last_print).as_millis() as u64 >= PROGRESS_INTERVAL_MS
                || stats.done >= stats.total
            {
                let eta = stats
                    .eta_secs()
                    .map(|s| format!("{:.0}s", s))
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "  {} / {} links ({:.1}%)  {} kept  {:.1} links/s  ETA {}",
                    stats.done,
                    stats.total,
                    stats.fraction() * 100.0,
                    stats.accepted,
                    stats.rate(),
                    eta
                );
                last_print = now;
            }
        }
    });

    let validator = LinkValidator::new(cfg.validator_options());
    let fetcher = HttpFetcher::default();
    let denylists = cfg.denylists();
    let workers = cfg.workers();
    let sources = cfg.sources.clone();
    let output_path = cfg.output_path.clone();

    let summary = tokio::task::spawn_blocking(move || {
        scheduler::run_sources(
            &sources,
            &denylists,
            &fetcher,
            &validator,
            workers,
            &sink,
            Some(&progress_tx),
        )
    })
    .await
    .context("run task join")?;

    let _ = progress_handle.await;

    for report in &summary.sources {
        match &report.status {
            SourceStatus::Processed { parse, dispatch } => println!(
                "{}: {} kept, {} too slow, {} invalid ({} groups / {} links filtered)",
                report.url,
                dispatch.accepted,
                dispatch.latency_filtered,
                dispatch.rejected,
                parse.denied_groups,
                parse.denied_links
            ),
            SourceStatus::FetchFailed(reason) => {
                println!("{}: download failed: {}", report.url, reason)
            }
        }
    }
    println!(
        "Wrote {} of {} link(s) to {}",
        summary.accepted(),
        summary.validated(),
        output_path.display()
    );
    tracing::info!(
        accepted = summary.accepted(),
        validated = summary.validated(),
        failed_sources = summary.failed_sources(),
        "run completed"
    );
    Ok(())
}
