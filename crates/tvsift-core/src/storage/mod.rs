//! Output playlist file.
//!
//! The sink is truncated once at run start and only appended to afterwards.
//! Each accepted candidate is written as one complete 2- or 3-line entry
//! under a lock, so concurrent writers never interleave.

mod writer;

pub use writer::OutputSink;

use crate::playlist::Candidate;

/// Serialized form of one accepted entry: metadata, optional directive, link.
pub fn format_entry(candidate: &Candidate) -> String {
    let mut out = String::with_capacity(
        candidate.metadata.len() + candidate.link.len() + 3,
    );
    out.push_str(&candidate.metadata);
    out.push('\n');
    if let Some(directive) = &candidate.directive {
        out.push_str(directive);
        out.push('\n');
    }
    out.push_str(&candidate.link);
    out.push('\n');
    out
}
