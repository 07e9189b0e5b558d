//! CLI command handlers, one per file.

mod check;
mod completions;
mod parse;
mod run;

pub use check::run_check;
pub use completions::{run_completions, run_manpage};
pub use parse::run_parse;
pub use run::run_sift;
