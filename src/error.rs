use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Import module-level errors for AppError
use crate::config::settings::ConfigError;
use crate::hooks::HookError;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Errors raised while a rule inspects or rewrites a single file
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a text file", .0.display())]
    NotText(PathBuf),

    #[error("Failed to talk to the terminal: {0}")]
    Prompt(#[source] io::Error),

    #[error("Input closed by operator, push aborted")]
    Cancelled,
}

impl RuleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RuleError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must halt the whole run instead of just the current file
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuleError::Cancelled | RuleError::Prompt(_))
    }
}

/// Top-level application error that wraps all module-specific errors
///
/// Discovery failures, operator cancellation and configuration problems end
/// up here and abort the push. Per-file rule failures normally stay inside
/// the gate report and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for rule application
pub type RuleOutcome<T> = std::result::Result<T, RuleError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
