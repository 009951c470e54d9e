pub mod executor;
pub mod parser;
pub mod repository;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use parser::{CommitId, parse_commit_ids, parse_path_list};
pub use repository::{DETACHED_HEAD, Repository, VersionControl};
