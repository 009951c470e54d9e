//! Installing the gate as git's pre-push hook.

use crate::error::GitError;
use crate::git::Repository;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Marker identifying a hook written by us
const HOOK_MARKER: &str = "pushgate pre-push gate";

/// Pre-push hook script header; the exec line is appended per install
const PRE_PUSH_HEADER: &str = r#"#!/bin/sh
# pushgate pre-push gate (auto-installed)
# Fixes debugger statements, trailing whitespace and trailing newlines in the
# files being pushed. Aborts the push when anything was changed.

"#;

/// Program name used when the running binary cannot be located
const FALLBACK_PROGRAM: &str = "pushgate";

/// Hook script that runs `program` with git's pre-push arguments
///
/// The absolute path is written so the hook does not depend on `PATH`
/// inside git's hook environment.
pub fn pre_push_script(program: &Path) -> String {
    format!(
        "{}exec {} \"$@\"\n",
        PRE_PUSH_HEADER,
        shell_quote(&program.to_string_lossy())
    )
}

/// Single-quote `word` for /bin/sh
fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Path of the running pushgate binary, or its bare name as a last resort
fn current_program() -> PathBuf {
    match env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "Cannot locate pushgate binary, hook will rely on PATH");
            PathBuf::from(FALLBACK_PROGRAM)
        }
    }
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Cannot locate hooks directory: {0}")]
    HooksDir(#[from] GitError),

    #[error("{} already exists and was not written by pushgate (use --force to replace it)", .0.display())]
    ForeignHook(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What `install_pre_push` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    Replaced(PathBuf),
    AlreadyInstalled(PathBuf),
}

/// Directory git reads hooks from (respects worktrees and `core.hooksPath`)
pub fn hooks_dir(repo: &Repository) -> Result<PathBuf, HookError> {
    let output = repo.executor().execute("rev-parse --git-path hooks")?;
    let dir = PathBuf::from(output.stdout.trim());

    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(repo.path().join(dir))
    }
}

/// Check if our hook is already installed at `path`
pub fn is_installed(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(HOOK_MARKER))
        .unwrap_or(false)
}

/// Write the pre-push hook into the repository
///
/// An existing hook of ours is left as is. Someone else's hook is only
/// replaced with `force`.
pub fn install_pre_push(repo: &Repository, force: bool) -> Result<InstallOutcome, HookError> {
    let dir = hooks_dir(repo)?;
    fs::create_dir_all(&dir)?;

    let path = dir.join("pre-push");
    let existed = path.exists();

    if existed {
        if is_installed(&path) {
            return Ok(InstallOutcome::AlreadyInstalled(path));
        }
        if !force {
            return Err(HookError::ForeignHook(path));
        }
    }

    fs::write(&path, pre_push_script(&current_program()))?;
    make_executable(&path)?;
    info!(path = %path.display(), "Installed pre-push hook");

    if existed {
        Ok(InstallOutcome::Replaced(path))
    } else {
        Ok(InstallOutcome::Installed(path))
    }
}

/// Remove our pre-push hook; other hooks are never touched
pub fn uninstall_pre_push(repo: &Repository) -> Result<bool, HookError> {
    let path = hooks_dir(repo)?.join("pre-push");

    if !is_installed(&path) {
        return Ok(false);
    }

    fs::remove_file(&path)?;
    info!(path = %path.display(), "Removed pre-push hook");
    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
