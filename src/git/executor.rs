use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Exit status of a quiet git query whose answer is no
const PROBE_NO: i32 = 1;

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Executes git commands from the root of a repository
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given repository path
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Execute a git command and return its output
    ///
    /// The command string should not include the "git" prefix and is split on
    /// whitespace, e.g. `executor.execute("ls-files --modified")`. Arguments go
    /// straight to the git process, no shell is involved. A non-zero exit
    /// status is reported as `GitError::CommandFailed`; a missing git binary
    /// as `GitError::IoError`.
    pub fn execute(&self, command: &str) -> GitResult<CommandOutput> {
        let output = self.spawn(command)?;
        self.process_output(output, command)
    }

    /// Execute a quiet git query, mapping exit status 1 to `None`
    ///
    /// Used for `symbolic-ref -q` and `rev-parse --verify -q`, which exit
    /// with 1 and print nothing when the answer is no. Any other failure
    /// (corrupt repository, bad arguments, lock errors) is still an error.
    pub fn probe(&self, command: &str) -> GitResult<Option<CommandOutput>> {
        let output = self.spawn(command)?;

        if output.status.code() == Some(PROBE_NO) {
            debug!(command, "Git probe answered no");
            return Ok(None);
        }

        self.process_output(output, command).map(Some)
    }

    fn spawn(&self, command: &str) -> GitResult<Output> {
        let args: Vec<&str> = command.split_whitespace().collect();
        if args.is_empty() {
            return Err(GitError::CommandFailed("Empty command".to_string()));
        }

        debug!(command, repo = %self.repo_path.display(), "Running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.repo_path)
            .output()?;

        Ok(output)
    }

    /// Turn the raw process output into a CommandOutput
    fn process_output(&self, output: Output, command: &str) -> GitResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        if !output.status.success() {
            return Err(GitError::CommandFailed(format!(
                "Command 'git {}' failed with exit code {}: {}",
                command,
                exit_code,
                stderr.trim()
            )));
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
        })
    }

    /// Get the repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}
