use crate::error::GitResult;
use crate::git::{CommitId, VersionControl};
use std::collections::BTreeSet;
use tracing::debug;

/// Repository-relative paths touched by the commits being pushed
pub type FileSet = BTreeSet<String>;

/// Commits on `branch` that have not reached the remote yet, newest first
///
/// An unborn branch yields an empty list. A history that cannot be read is an
/// error and nothing is enumerated.
pub fn enumerate_revisions<V: VersionControl + ?Sized>(
    vcs: &V,
    branch: &str,
) -> GitResult<Vec<CommitId>> {
    let ids = vcs.local_commit_ids(branch)?;
    debug!(branch, count = ids.len(), "Enumerated local commits");
    Ok(ids)
}

/// Union of the files changed by each commit
///
/// Paths are trimmed of trailing whitespace; duplicates across commits
/// collapse into one entry.
pub fn resolve_files<V: VersionControl + ?Sized>(vcs: &V, ids: &[CommitId]) -> GitResult<FileSet> {
    let mut files = FileSet::new();

    for id in ids {
        for path in vcs.files_changed_by_commit(id)? {
            let path = path.trim_end();
            if !path.is_empty() {
                files.insert(path.to_string());
            }
        }
    }

    debug!(commits = ids.len(), files = files.len(), "Resolved file set");
    Ok(files)
}

/// Everything the gate needs to know about the pending push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushScope {
    pub branch: String,
    pub commits: Vec<CommitId>,
    pub files: FileSet,
}

/// Resolve the current branch, its unpushed commits and their files
pub fn discover_scope<V: VersionControl + ?Sized>(vcs: &V) -> GitResult<PushScope> {
    let branch = vcs.current_branch_name()?;
    let commits = enumerate_revisions(vcs, &branch)?;
    let files = resolve_files(vcs, &commits)?;

    Ok(PushScope {
        branch,
        commits,
        files,
    })
}
