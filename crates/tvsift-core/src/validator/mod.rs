//! Link validation: header resolution, redirect trace, content probe, admission.
//!
//! `LinkValidator::check` is total. Every failure along the way is reduced to a
//! rejected `ValidationResult`; nothing is raised to the caller.

mod decide;

use std::fmt;
use std::time::Duration;

use crate::failure::{classify, FailureKind, NetError};
use crate::headers;
use crate::http::RequestOptions;
use crate::playlist::Candidate;
use crate::probe;
use crate::trace::{self, TraceStop};

pub use decide::decide;

/// Outcome category of one validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Playlist signature present, but response slower than the threshold.
    LatencyFiltered,
    /// 200 response without a playlist signature.
    NoSignature,
    /// Terminal URL answered with a non-200 status.
    HttpStatus(u32),
    /// Trace or probe failed at the network level.
    Transport(FailureKind),
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::LatencyFiltered => write!(f, "latency too high"),
            Verdict::NoSignature => write!(f, "not a playlist"),
            Verdict::HttpStatus(code) => write!(f, "HTTP {}", code),
            Verdict::Transport(kind) => write!(f, "transport failure ({})", kind),
        }
    }
}

/// Decision for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub final_url: String,
    /// Measured response time in seconds (0 when no 200 response was seen).
    pub latency_secs: f64,
    pub verdict: Verdict,
}

impl ValidationResult {
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    fn rejected(final_url: String, err: &NetError) -> Self {
        let verdict = match classify(err) {
            FailureKind::Http(code) => Verdict::HttpStatus(code),
            kind => Verdict::Transport(kind),
        };
        Self {
            final_url,
            latency_secs: 0.0,
            verdict,
        }
    }
}

/// Something that can decide whether a candidate is kept.
///
/// Implemented by `LinkValidator`; the dispatcher only depends on this trait.
pub trait LinkCheck: Send + Sync {
    fn check(&self, candidate: &Candidate) -> ValidationResult;
}

/// Settings for the validator.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorOptions {
    pub request: RequestOptions,
    /// Maximum accepted response time in seconds (inclusive).
    pub latency_threshold_secs: f64,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            request: RequestOptions::default(),
            latency_threshold_secs: 5.0,
        }
    }
}

impl ValidatorOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }
}

/// curl-backed validator.
#[derive(Debug, Clone, Default)]
pub struct LinkValidator {
    opts: ValidatorOptions,
}

impl LinkValidator {
    pub fn new(opts: ValidatorOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.opts
    }

    /// Validate a bare link with an optional directive line.
    pub fn validate(&self, link: &str, directive: Option<&str>) -> ValidationResult {
        let headers = headers::resolve(directive);

        let traced = match trace::trace_redirects(link, &headers, &self.opts.request) {
            Ok(t) => t,
            Err(e) => {
                tracing::info!(link, error = %e, "redirect trace failed");
                return ValidationResult::rejected(link.to_string(), &e);
            }
        };
        match traced.stop {
            TraceStop::Terminal(_) => {}
            TraceStop::MissingLocation(status) => {
                tracing::debug!(link, status, "trace stopped: redirect without Location");
            }
            TraceStop::HopLimit => {
                tracing::debug!(link, hops = traced.hops, "trace stopped: hop bound");
            }
        }

        let traced_url = traced.url;
        let outcome = match probe::probe(&traced_url, &headers, &self.opts.request) {
            Ok(o) => o,
            Err(e) => {
                tracing::info!(url = %traced_url, error = %e, "content probe failed");
                return ValidationResult::rejected(traced_url, &e);
            }
        };
        // The GET may have followed further redirects past the traced URL.
        let final_url = match &outcome.effective_url {
            Some(url) if *url != traced_url => {
                tracing::debug!(traced = %traced_url, url = %url, "probe redirected further");
                url.clone()
            }
            _ => traced_url,
        };

        let verdict = decide(&outcome, self.opts.latency_threshold_secs);
        match verdict {
            Verdict::Accepted => tracing::info!(
                url = %final_url,
                latency = %format!("{:.2}s", outcome.latency_secs),
                "playlist reachable"
            ),
            Verdict::LatencyFiltered => tracing::info!(
                url = %final_url,
                latency = %format!("{:.2}s", outcome.latency_secs),
                threshold = self.opts.latency_threshold_secs,
                "latency too high, filtered"
            ),
            Verdict::NoSignature => tracing::info!(url = %final_url, "response is not a playlist"),
            Verdict::HttpStatus(code) => tracing::info!(url = %final_url, status = code, "HTTP error"),
            Verdict::Transport(_) => {}
        }

        ValidationResult {
            final_url,
            latency_secs: outcome.latency_secs,
            verdict,
        }
    }
}

impl LinkCheck for LinkValidator {
    fn check(&self, candidate: &Candidate) -> ValidationResult {
        self.validate(&candidate.link, candidate.directive.as_deref())
    }
}
