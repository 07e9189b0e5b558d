//! Sequential run over all source documents.

use crate::playlist::{self, Denylists, ParseReport};
use crate::source::DocumentFetcher;
use crate::storage::OutputSink;
use crate::validator::LinkCheck;

use super::dispatch::{dispatch, DispatchSummary};
use super::progress::ProgressStats;

/// What happened to one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// Fetched, parsed and fully dispatched.
    Processed {
        parse: ParseReport,
        dispatch: DispatchSummary,
    },
    /// Download failed; the source was skipped.
    FetchFailed(String),
}

/// Per-source report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub url: String,
    pub status: SourceStatus,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
}

impl RunSummary {
    /// Entries accepted across all sources.
    pub fn accepted(&self) -> usize {
        self.dispatched().map(|d| d.accepted).sum()
    }

    /// Candidates validated across all sources.
    pub fn validated(&self) -> usize {
        self.dispatched().map(|d| d.total).sum()
    }

    /// Sources that could not be fetched.
    pub fn failed_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.status, SourceStatus::FetchFailed(_)))
            .count()
    }

    fn dispatched(&self) -> impl Iterator<Item = &DispatchSummary> {
        self.sources.iter().filter_map(|s| match &s.status {
            SourceStatus::Processed { dispatch, .. } => Some(dispatch),
            SourceStatus::FetchFailed(_) => None,
        })
    }
}

/// Process `sources` one after another: fetch, parse fully, dispatch fully.
///
/// A fetch failure is logged and recorded; remaining sources still run.
pub fn run_sources<F, C>(
    sources: &[String],
    denylists: &Denylists,
    fetcher: &F,
    checker: &C,
    workers: usize,
    sink: &OutputSink,
    progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressStats>>,
) -> RunSummary
where
    F: DocumentFetcher,
    C: LinkCheck,
{
    let mut summary = RunSummary::default();
    for url in sources {
        let text = match fetcher.fetch(url) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(source = %url, error = %e, "failed to fetch playlist, skipping");
                summary.sources.push(SourceReport {
                    url: url.clone(),
                    status: SourceStatus::FetchFailed(e.to_string()),
                });
                continue;
            }
        };
        tracing::info!(source = %url, bytes = text.len(), "playlist downloaded");

        let (candidates, parse) = playlist::parse_document(&text, denylists);
        tracing::info!(
            source = %url,
            candidates = candidates.len(),
            denied_groups = parse.denied_groups,
            denied_links = parse.denied_links,
            "playlist parsed"
        );

        let dispatch = dispatch(url, candidates, checker, workers, sink, progress_tx);
        tracing::info!(
            source = %url,
            accepted = dispatch.accepted,
            latency_filtered = dispatch.latency_filtered,
            rejected = dispatch.rejected,
            "source finished"
        );
        summary.sources.push(SourceReport {
            url: url.clone(),
            status: SourceStatus::Processed { parse, dispatch },
        });
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::NetError;
    use crate::playlist::Candidate;
    use crate::validator::{ValidationResult, Verdict};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapFetcher {
        docs: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl DocumentFetcher for MapFetcher {
        fn fetch(&self, url: &str) -> Result<String, NetError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.docs.get(url).cloned().ok_or(NetError::Http(404))
        }
    }

    struct AcceptAll;

    impl LinkCheck for AcceptAll {
        fn check(&self, c: &Candidate) -> ValidationResult {
            ValidationResult {
                final_url: c.link.clone(),
                latency_secs: 0.5,
                verdict: Verdict::Accepted,
            }
        }
    }

    #[test]
    fn failed_source_is_skipped_and_others_run() {
        let mut docs = HashMap::new();
        docs.insert(
            "http://s/one.m3u".to_string(),
            "#EXTINF:-1 group-title=\"News\",A\nhttp://a.tv/1\n".to_string(),
        );
        docs.insert(
            "http://s/three.m3u".to_string(),
            "#EXTINF:-1 group-title=\"Taiwan\",B\nhttp://b.tv/2\n\
             #EXTINF:-1 group-title=\"Sport\",C\nhttp://c.tv/3\n"
                .to_string(),
        );
        let fetcher = MapFetcher {
            docs,
            calls: Mutex::new(Vec::new()),
        };
        let sources = vec![
            "http://s/one.m3u".to_string(),
            "http://s/two.m3u".to_string(),
            "http://s/three.m3u".to_string(),
        ];
        let dir = tempfile::tempdir().unwrap();
        let sink = OutputSink::create(&dir.path().join("new.m3u")).unwrap();

        let summary = run_sources(&sources, &Denylists::default(), &fetcher, &AcceptAll, 10, &sink, None);

        assert_eq!(*fetcher.calls.lock().unwrap(), sources);
        assert_eq!(summary.sources.len(), 3);
        assert_eq!(summary.failed_sources(), 1);
        assert_eq!(summary.accepted(), 2);
        assert_eq!(summary.validated(), 2);
        assert_eq!(
            summary.sources[1].status,
            SourceStatus::FetchFailed("HTTP 404".to_string())
        );
        match &summary.sources[2].status {
            SourceStatus::Processed { parse, dispatch } => {
                assert_eq!(parse.denied_groups, 1);
                assert_eq!(dispatch.accepted, 1);
            }
            other => panic!("expected Processed, got {other:?}"),
        }

        let text = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(
            text,
            "#EXTINF:-1 group-title=\"News\",A\nhttp://a.tv/1\n\
             #EXTINF:-1 group-title=\"Sport\",C\nhttp://c.tv/3\n"
        );
    }
}
