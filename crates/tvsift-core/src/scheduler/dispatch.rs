//! Bounded worker pool over one document's candidates.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Instant;

use crate::playlist::Candidate;
use crate::storage::OutputSink;
use crate::validator::{LinkCheck, ValidationResult, Verdict};

use super::progress::ProgressStats;

/// Counts for one document's dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub total: usize,
    pub accepted: usize,
    /// Playlist reachable but slower than the threshold.
    pub latency_filtered: usize,
    /// Any other rejection (status, no signature, transport).
    pub rejected: usize,
    /// Accepted entries that could not be appended.
    pub write_errors: usize,
}

impl DispatchSummary {
    fn record(&mut self, result: &ValidationResult) {
        match result.verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::LatencyFiltered => self.latency_filtered += 1,
            _ => self.rejected += 1,
        }
    }
}

/// Validate `candidates` with up to `workers` threads and append accepted ones to `sink`.
///
/// Workers pull from a shared queue and send results back over a channel;
/// this thread appends in completion order. Returns once every candidate has
/// a result (the pool is drained). If `progress_tx` is set, a snapshot is
/// offered after each result with `try_send`, so a slow consumer never blocks.
pub fn dispatch<C: LinkCheck>(
    source: &str,
    candidates: Vec<Candidate>,
    checker: &C,
    workers: usize,
    sink: &OutputSink,
    progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressStats>>,
) -> DispatchSummary {
    let count = candidates.len();
    let mut summary = DispatchSummary {
        total: count,
        ..DispatchSummary::default()
    };
    if count == 0 {
        return summary;
    }

    let work: Mutex<VecDeque<(usize, Candidate)>> =
        Mutex::new(candidates.into_iter().enumerate().collect());
    let num_workers = workers.max(1).min(count);
    let start = Instant::now();

    std::thread::scope(|s| {
        let (tx, rx) = mpsc::channel::<(Candidate, ValidationResult)>();
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            s.spawn(move || loop {
                let next = match work.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(_) => None,
                };
                let Some((index, candidate)) = next else {
                    break;
                };
                tracing::trace!(index, link = %candidate.link, "validating");
                let result = checker.check(&candidate);
                if tx.send((candidate, result)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        let mut done = 0usize;
        for (candidate, result) in rx {
            done += 1;
            summary.record(&result);
            if result.accepted() {
                match sink.append(&candidate) {
                    Ok(()) => tracing::info!(
                        name = candidate.display_name(),
                        link = %candidate.link,
                        latency = %format!("{:.2}s", result.latency_secs),
                        "valid link written"
                    ),
                    Err(e) => {
                        summary.write_errors += 1;
                        tracing::error!(link = %candidate.link, error = %format!("{:#}", e), "append failed");
                    }
                }
            } else {
                tracing::debug!(link = %candidate.link, verdict = ?result.verdict, "invalid link");
            }
            if let Some(progress_tx) = progress_tx {
                let _ = progress_tx.try_send(ProgressStats {
                    source: source.to_string(),
                    done,
                    total: count,
                    accepted: summary.accepted,
                    elapsed_secs: start.elapsed().as_secs_f64(),
                });
            }
        }
    });

    summary
}
