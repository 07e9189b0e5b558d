//! Integration test: a full run over several source documents served by a
//! local HTTP server, checking the output file.

mod common;

use common::stream_server::{closed_port_url, Route, TestServer};
use std::collections::HashMap;
use std::time::Duration;
use tvsift_core::http::RequestOptions;
use tvsift_core::playlist::{Denylists, DEFAULT_DOMAIN_DENYLIST, DEFAULT_GROUP_DENYLIST};
use tvsift_core::scheduler::{run_sources, ProgressStats, SourceStatus};
use tvsift_core::source::HttpFetcher;
use tvsift_core::storage::OutputSink;
use tvsift_core::validator::{LinkValidator, ValidatorOptions};

fn entry(meta: &str, directive: Option<&str>, link: &str) -> String {
    match directive {
        Some(d) => format!("{}\n{}\n{}\n", meta, d, link),
        None => format!("{}\n{}\n", meta, link),
    }
}

fn start_server() -> TestServer {
    TestServer::start(|base| {
        let first = format!(
            "#EXTM3U\n\
             #EXTINF:-1 group-title=\"News\",Good One\n\
             {base}/good1.m3u8\n\
             #EXTINF:-1 group-title=\"News\",Gated\n\
             #EXTVLCOPT:http-user-agent=TestAgent\n\
             {base}/gated.m3u8\n\
             #EXTINF:-1,Still News\n\
             {base}/dead.m3u8\n\
             #EXTINF:-1 group-title=\"China\",Blocked Group\n\
             {base}/good1.m3u8\n\
             #EXTVLCOPT:http-user-agent=Nobody\n\
             #EXTINF:-1 group-title=\"Sports\",Blocked Domain\n\
             http://epg.pw/live.m3u8\n\
             #EXTINF:-1 group-title=\"Sports\",Redirected\n\
             {base}/hop\n\
             #EXTINF:-1 group-title=\"Sports\",Web Page\n\
             {base}/page\n",
            base = base
        );
        let second = format!(
            "#EXTM3U\n\
             #EXTINF:-1 group-title=\"Movies\",Second Source\n\
             {base}/good2.m3u8\n\
             #EXTINF:-1 group-title=\"Movies\",Too Slow\n\
             {base}/slow.m3u8\n",
            base = base
        );
        let mut m = HashMap::new();
        m.insert("/first.m3u".to_string(), Route::ok(first));
        m.insert("/second.m3u".to_string(), Route::ok(second));
        m.insert("/missing.m3u".to_string(), Route::status(404));
        m.insert("/good1.m3u8".to_string(), Route::playlist());
        m.insert("/good2.m3u8".to_string(), Route::playlist());
        m.insert(
            "/gated.m3u8".to_string(),
            Route::playlist().requiring("User-Agent", "TestAgent"),
        );
        m.insert("/dead.m3u8".to_string(), Route::status(404));
        m.insert("/hop".to_string(), Route::redirect(302, "/landing.m3u8"));
        m.insert("/landing.m3u8".to_string(), Route::playlist());
        m.insert("/page".to_string(), Route::ok("<html><body>gone</body></html>"));
        m.insert(
            "/slow.m3u8".to_string(),
            Route::playlist().delayed(Duration::from_millis(1500)),
        );
        m
    })
}

#[test]
fn run_over_sources_writes_only_accepted_entries() {
    let server = start_server();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out").join("new.m3u");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, "stale content from a previous run\n").unwrap();

    let sources = vec![
        server.url("/first.m3u"),
        server.url("/missing.m3u"),
        closed_port_url(),
        server.url("/second.m3u"),
    ];
    let denylists = Denylists::new(DEFAULT_GROUP_DENYLIST, DEFAULT_DOMAIN_DENYLIST);
    let fetcher = HttpFetcher {
        timeout: Duration::from_secs(5),
    };
    let validator = LinkValidator::new(ValidatorOptions {
        request: RequestOptions {
            timeout: Duration::from_secs(5),
            max_redirects: 10,
        },
        latency_threshold_secs: 0.75,
    });
    let sink = OutputSink::create(&out).unwrap();
    let (tx, mut rx) = tokio::sync::mpsc::channel::<ProgressStats>(64);

    let summary = run_sources(&sources, &denylists, &fetcher, &validator, 4, &sink, Some(&tx));
    drop(tx);

    assert_eq!(summary.sources.len(), 4);
    assert_eq!(summary.failed_sources(), 2);
    assert_eq!(summary.validated(), 7);
    assert_eq!(summary.accepted(), 4);
    assert_eq!(sink.entries_written(), 4);

    match &summary.sources[0].status {
        SourceStatus::Processed { parse, dispatch } => {
            assert_eq!(parse.denied_groups, 1);
            assert_eq!(parse.denied_links, 1);
            assert_eq!(dispatch.total, 5);
            assert_eq!(dispatch.accepted, 3);
            assert_eq!(dispatch.rejected, 2);
        }
        other => panic!("unexpected status {:?}", other),
    }
    assert!(matches!(summary.sources[1].status, SourceStatus::FetchFailed(_)));
    assert!(matches!(summary.sources[2].status, SourceStatus::FetchFailed(_)));
    match &summary.sources[3].status {
        SourceStatus::Processed { dispatch, .. } => {
            assert_eq!(dispatch.total, 2);
            assert_eq!(dispatch.accepted, 1);
            assert_eq!(dispatch.latency_filtered, 1);
        }
        other => panic!("unexpected status {:?}", other),
    }

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(!written.contains("stale content"));
    assert!(!written.contains("#EXTM3U"));

    let first_entries = [
        entry(
            "#EXTINF:-1 group-title=\"News\",Good One",
            None,
            &server.url("/good1.m3u8"),
        ),
        entry(
            "#EXTINF:-1 group-title=\"News\",Gated",
            Some("#EXTVLCOPT:http-user-agent=TestAgent"),
            &server.url("/gated.m3u8"),
        ),
        // Original link is written, not the redirect target.
        entry(
            "#EXTINF:-1 group-title=\"Sports\",Redirected",
            None,
            &server.url("/hop"),
        ),
    ];
    let second_entry = entry(
        "#EXTINF:-1 group-title=\"Movies\",Second Source",
        None,
        &server.url("/good2.m3u8"),
    );

    // Within a source entries land in completion order; sources stay in order.
    let expected_len: usize =
        first_entries.iter().map(String::len).sum::<usize>() + second_entry.len();
    assert_eq!(written.len(), expected_len);
    assert!(written.ends_with(&second_entry));
    let head = &written[..written.len() - second_entry.len()];
    for e in &first_entries {
        assert!(head.contains(e.as_str()), "missing entry {:?} in {:?}", e, written);
    }

    // The denied-group occurrence of good1 never reaches the network.
    assert_eq!(
        server.requests_for("/good1.m3u8").len(),
        2,
        "one HEAD and one GET for the single admitted occurrence"
    );

    let mut last = None;
    while let Ok(p) = rx.try_recv() {
        last = Some(p);
    }
    let last = last.expect("progress was reported");
    assert_eq!(last.source, server.url("/second.m3u"));
    assert_eq!(last.done, 2);
    assert_eq!(last.total, 2);
    assert_eq!(last.accepted, 1);
}
