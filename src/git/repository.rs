use crate::error::{GitError, GitResult};
use crate::git::executor::GitExecutor;
use crate::git::parser::{self, CommitId};
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name used for the branch when HEAD is detached
pub const DETACHED_HEAD: &str = "HEAD";

/// The version-control operations the push gate depends on
///
/// `Repository` implements this on top of the git binary; tests can swap in
/// an in-memory history.
pub trait VersionControl {
    /// Name of the checked out branch, or `HEAD` when detached
    fn current_branch_name(&self) -> GitResult<String>;

    /// Commits on `branch` that the remote does not have yet, newest first
    fn local_commit_ids(&self, branch: &str) -> GitResult<Vec<CommitId>>;

    /// Repository-relative paths touched by a single commit
    fn files_changed_by_commit(&self, id: &str) -> GitResult<Vec<String>>;

    /// Repository-relative paths whose working tree copy differs from the index
    fn files_with_unstaged_modifications(&self) -> GitResult<BTreeSet<String>>;
}

/// A git working tree and access to its history
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    ///
    /// `.git` may be a directory or, for worktrees and submodules, a file.
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            if current.join(".git").exists() {
                return Ok(Self::new(current));
            }

            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known working tree root
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the git executor for this repository
    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }

    /// Whether `branch` already points at a commit (false for an unborn branch)
    fn has_commits(&self, branch: &str) -> GitResult<bool> {
        let cmd = format!("rev-parse --verify -q {}^{{commit}}", branch);
        Ok(self.executor.probe(&cmd)?.is_some())
    }

    /// Whether HEAD points at `refs/heads/<branch>` before that ref exists
    fn is_unborn(&self, branch: &str) -> GitResult<bool> {
        let Some(output) = self.executor.probe("symbolic-ref -q HEAD")? else {
            return Ok(false);
        };

        let head_ref = output.stdout.trim();
        if head_ref != format!("refs/heads/{}", branch) {
            return Ok(false);
        }

        let cmd = format!("rev-parse --verify -q {}", head_ref);
        Ok(self.executor.probe(&cmd)?.is_none())
    }

    /// Upstream tracking branch of a local branch, if one is configured
    fn upstream_of(&self, branch: &str) -> GitResult<Option<String>> {
        if branch == DETACHED_HEAD {
            return Ok(None);
        }

        let cmd = format!(
            "for-each-ref --format=%(upstream:short) refs/heads/{}",
            branch
        );
        let output = self.executor.execute(&cmd)?;
        let upstream = output.stdout.trim();

        if upstream.is_empty() {
            Ok(None)
        } else {
            Ok(Some(upstream.to_string()))
        }
    }
}

impl VersionControl for Repository {
    fn current_branch_name(&self) -> GitResult<String> {
        match self.executor.probe("symbolic-ref --short -q HEAD")? {
            Some(output) => {
                let branch = output.stdout.trim();
                if branch.is_empty() {
                    Ok(DETACHED_HEAD.to_string())
                } else {
                    Ok(branch.to_string())
                }
            }
            None => Ok(DETACHED_HEAD.to_string()),
        }
    }

    fn local_commit_ids(&self, branch: &str) -> GitResult<Vec<CommitId>> {
        if !self.has_commits(branch)? {
            if self.is_unborn(branch)? {
                debug!(branch, "Branch has no commits yet");
                return Ok(Vec::new());
            }
            return Err(GitError::CommandFailed(format!(
                "Cannot resolve branch '{}'",
                branch
            )));
        }

        let cmd = match self.upstream_of(branch)? {
            Some(upstream) => format!("rev-list {} ^{}", branch, upstream),
            None => format!("rev-list {} --not --remotes", branch),
        };

        let output = self.executor.execute(&cmd)?;
        parser::parse_commit_ids(&output.stdout)
    }

    fn files_changed_by_commit(&self, id: &str) -> GitResult<Vec<String>> {
        let cmd = format!(
            "-c core.quotepath=off diff-tree --no-commit-id --name-only -r --root {}",
            id
        );
        let output = self.executor.execute(&cmd)?;
        Ok(parser::parse_path_list(&output.stdout))
    }

    fn files_with_unstaged_modifications(&self) -> GitResult<BTreeSet<String>> {
        let output = self
            .executor
            .execute("-c core.quotepath=off ls-files --modified")?;
        Ok(parser::parse_path_list(&output.stdout).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(repo_path: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(repo_path)
            .output()
            .unwrap();
    }

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let repo_path = temp_dir.path().to_path_buf();

        git(&repo_path, &["init", "-b", "main"]);
        git(&repo_path, &["config", "user.name", "Test User"]);
        git(&repo_path, &["config", "user.email", "test@example.com"]);

        (temp_dir, repo_path)
    }

    fn commit(repo_path: &Path, file: &str, content: &str) {
        fs::write(repo_path.join(file), content).unwrap();
        git(repo_path, &["add", file]);
        git(repo_path, &["commit", "-m", file]);
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (_temp, repo_path) = create_test_repo();

        let sub_dir = repo_path.join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let repo = Repository::discover_from(&sub_dir).unwrap();
        assert_eq!(repo.path(), repo_path.as_path());
    }

    #[test]
    fn test_discover_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let result = Repository::discover_from(temp_dir.path());

        assert!(matches!(result, Err(GitError::NotARepository)));
    }

    #[test]
    fn test_current_branch_in_empty_repo() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        assert_eq!(repo.current_branch_name().unwrap(), "main");
    }

    #[test]
    fn test_unborn_branch_has_no_local_commits() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        assert!(repo.local_commit_ids("main").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_branch_is_error() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        // Unborn main does not make other names resolvable
        assert!(repo.local_commit_ids("no-such-branch").is_err());

        commit(&repo_path, "file.txt", "content\n");
        let result = repo.local_commit_ids("no-such-branch");
        assert!(matches!(result, Err(GitError::CommandFailed(_))));
    }

    #[test]
    fn test_branch_name_with_dollar_sign() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        git(&repo_path, &["checkout", "-b", "fix$1"]);
        commit(&repo_path, "a.txt", "dirty   ");

        assert_eq!(repo.current_branch_name().unwrap(), "fix$1");
        assert_eq!(repo.local_commit_ids("fix$1").unwrap().len(), 1);
    }

    #[test]
    fn test_local_commits_newest_first() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        commit(&repo_path, "first.txt", "one\n");
        commit(&repo_path, "second.txt", "two\n");

        let ids = repo.local_commit_ids("main").unwrap();
        assert_eq!(ids.len(), 2);

        // Newest commit touched second.txt
        assert_eq!(repo.files_changed_by_commit(&ids[0]).unwrap(), vec!["second.txt"]);
        // Root commit still reports its files
        assert_eq!(repo.files_changed_by_commit(&ids[1]).unwrap(), vec!["first.txt"]);
    }

    #[test]
    fn test_detached_head() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        commit(&repo_path, "file.txt", "content\n");
        git(&repo_path, &["checkout", "--detach"]);

        assert_eq!(repo.current_branch_name().unwrap(), DETACHED_HEAD);
        assert_eq!(repo.local_commit_ids(DETACHED_HEAD).unwrap().len(), 1);
    }

    #[test]
    fn test_unstaged_modifications() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        commit(&repo_path, "file.txt", "original\n");
        commit(&repo_path, "other.txt", "other\n");
        fs::write(repo_path.join("file.txt"), "modified\n").unwrap();

        let modified = repo.files_with_unstaged_modifications().unwrap();
        assert_eq!(modified.len(), 1);
        assert!(modified.contains("file.txt"));
    }
}
