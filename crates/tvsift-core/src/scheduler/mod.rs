//! Document-by-document scheduling.
//!
//! Each source document goes through two phases separated by a barrier:
//! full parse, then full dispatch of its candidates over a bounded worker
//! pool. The next document starts only after the pool has drained.

mod dispatch;
mod progress;
mod run;

pub use dispatch::{dispatch, DispatchSummary};
pub use progress::ProgressStats;
pub use run::{run_sources, RunSummary, SourceReport, SourceStatus};
