use pushgate::config::ConfigError;
use pushgate::error::{AppError, AppResult, GitError, RuleError};
use pushgate::hooks::HookError;
use std::error::Error;
use std::path::PathBuf;

/// Test that GitError converts to AppError::Git
#[test]
fn test_git_error_converts_to_app_error() {
    let app_err: AppError = GitError::NotARepository.into();
    assert!(matches!(app_err, AppError::Git(_)));
}

/// Test that RuleError converts to AppError::Rule
#[test]
fn test_rule_error_converts_to_app_error() {
    let app_err: AppError = RuleError::Cancelled.into();
    assert!(matches!(app_err, AppError::Rule(RuleError::Cancelled)));
}

/// Test that ConfigError converts to AppError::Config
#[test]
fn test_config_error_converts_to_app_error() {
    let app_err: AppError = ConfigError::DirectoryNotFound.into();
    assert!(matches!(app_err, AppError::Config(_)));
}

/// Test that HookError converts to AppError::Hook
#[test]
fn test_hook_error_converts_to_app_error() {
    let hook_err = HookError::ForeignHook(PathBuf::from(".git/hooks/pre-push"));
    let app_err: AppError = hook_err.into();
    assert!(matches!(app_err, AppError::Hook(_)));
    assert!(app_err.to_string().contains("--force"));
}

/// Test that std::io::Error converts to AppError::Io
#[test]
fn test_io_error_converts_to_app_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
    let app_err: AppError = io_err.into();
    assert!(matches!(app_err, AppError::Io(_)));
}

/// Test that error source is preserved
#[test]
fn test_error_source_preserved() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
    let app_err: AppError = GitError::IoError(io_err).into();

    assert!(app_err.source().is_some());
}

/// Test that per-file I/O errors name the file and keep the cause
#[test]
fn test_rule_io_error_names_file() {
    let err = RuleError::Io {
        path: PathBuf::from("src/app.js"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    let msg = err.to_string();
    assert!(msg.contains("src/app.js"));
    assert!(msg.contains("denied"));
    assert!(err.source().is_some());
}

/// Test which rule errors stop the whole run
#[test]
fn test_fatal_rule_errors() {
    assert!(RuleError::Cancelled.is_fatal());
    assert!(RuleError::Prompt(std::io::Error::other("tty gone")).is_fatal());
    assert!(!RuleError::NotText(PathBuf::from("logo.png")).is_fatal());
    assert!(
        !RuleError::Io {
            path: PathBuf::from("a.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .is_fatal()
    );
}

/// Test AppError::Git variant displays correctly
#[test]
fn test_app_error_git_display() {
    let app_err = AppError::Git(GitError::CommandFailed("rev-list failed".to_string()));
    let msg = format!("{}", app_err);
    assert!(msg.contains("Git error"));
    assert!(msg.contains("rev-list failed"));
}

/// Test AppError::Config variant displays correctly
#[test]
fn test_app_error_config_display() {
    let app_err = AppError::Config(ConfigError::InvalidValue("bad".to_string()));
    assert!(app_err.to_string().contains("Configuration error"));
}

/// Test that ? operator works with AppError
#[test]
fn test_question_mark_operator() {
    fn enumerate() -> Result<(), GitError> {
        Err(GitError::ParseError("not a hash".to_string()))
    }

    fn review() -> Result<(), RuleError> {
        Err(RuleError::Cancelled)
    }

    fn run(first: bool) -> AppResult<()> {
        if first {
            enumerate()?;
        }
        review()?;
        Ok(())
    }

    assert!(matches!(run(true), Err(AppError::Git(_))));
    assert!(matches!(run(false), Err(AppError::Rule(_))));
}
