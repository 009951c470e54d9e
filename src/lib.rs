pub mod audit;
pub mod config;
pub mod error;
pub mod gate;
pub mod git;
pub mod hooks;
pub mod prompt;
pub mod rules;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{AppError, AppResult, GitError, GitResult, RuleError};
pub use gate::{Gate, GateReport, Verdict};
pub use git::{Repository, VersionControl};
pub use prompt::{Answer, Prompt, TerminalPrompt};
pub use rules::{RuleResult, RuleSet};
