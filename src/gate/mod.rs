//! The push gate: which files does the push carry, what did the rules do to
//! them, and may the push go ahead.

pub mod decision;
pub mod pipeline;
pub mod resolver;
pub mod tracker;

pub use decision::{Verdict, decide};
pub use pipeline::{FileOutcome, FileReport, Gate, GateReport, RuleRun};
pub use resolver::{FileSet, PushScope, discover_scope, enumerate_revisions, resolve_files};
pub use tracker::{PushState, unstaged_overlap};
