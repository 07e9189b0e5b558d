//! Admission policy.

use super::Verdict;
use crate::probe::ProbeOutcome;

/// Admission decision for a probe outcome.
///
/// Accepted iff the response was 200, carried a playlist signature and its
/// latency is at most `threshold_secs`.
pub fn decide(outcome: &ProbeOutcome, threshold_secs: f64) -> Verdict {
    if outcome.status != 200 {
        return Verdict::HttpStatus(outcome.status);
    }
    if !outcome.signature_present {
        return Verdict::NoSignature;
    }
    if outcome.latency_secs > threshold_secs {
        return Verdict::LatencyFiltered;
    }
    Verdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(latency: f64) -> ProbeOutcome {
        ProbeOutcome::from_prefix(b"#EXTM3U\n#EXT-X-VERSION:3\n", latency)
    }

    #[test]
    fn fast_playlist_accepted() {
        assert_eq!(decide(&ok(2.0), 5.0), Verdict::Accepted);
    }

    #[test]
    fn slow_playlist_latency_filtered() {
        assert_eq!(decide(&ok(7.0), 5.0), Verdict::LatencyFiltered);
    }

    #[test]
    fn latency_exactly_at_threshold_accepted() {
        assert_eq!(decide(&ok(5.0), 5.0), Verdict::Accepted);
        assert_eq!(decide(&ok(5.000_001), 5.0), Verdict::LatencyFiltered);
    }

    #[test]
    fn missing_signature_rejected_regardless_of_latency() {
        let fast = ProbeOutcome::from_prefix(b"<html>", 0.1);
        assert_eq!(decide(&fast, 5.0), Verdict::NoSignature);
        let slow = ProbeOutcome::from_prefix(b"<html>", 9.0);
        assert_eq!(decide(&slow, 5.0), Verdict::NoSignature);
    }

    #[test]
    fn not_found_rejected_with_zero_latency() {
        let p = ProbeOutcome::status_only(404);
        assert_eq!(decide(&p, 5.0), Verdict::HttpStatus(404));
        assert_eq!(p.latency_secs, 0.0);
    }
}
