use super::decision::{Verdict, decide};
use super::resolver::{FileSet, discover_scope};
use super::tracker::{PushState, unstaged_overlap};
use crate::error::{AppResult, RuleError};
use crate::git::{CommitId, VersionControl};
use crate::prompt::Prompt;
use crate::rules::{RuleResult, RuleSet};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One rule that ran against a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRun {
    pub rule: &'static str,
    pub result: RuleResult,
}

/// How processing of a single file ended
#[derive(Debug)]
pub enum FileOutcome {
    /// Every applicable rule ran
    Done(Vec<RuleRun>),
    /// Nothing to check, e.g. the commit deleted the file
    Skipped(String),
    /// A rule could not read or write the file; later rules were skipped
    Failed { completed: Vec<RuleRun>, error: RuleError },
}

#[derive(Debug)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn runs(&self) -> &[RuleRun] {
        match &self.outcome {
            FileOutcome::Done(runs) => runs,
            FileOutcome::Failed { completed, .. } => completed,
            FileOutcome::Skipped(_) => &[],
        }
    }

    /// Result of a named rule, if it ran
    pub fn result_of(&self, rule: &str) -> Option<RuleResult> {
        self.runs().iter().find(|run| run.rule == rule).map(|run| run.result)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

/// Everything a gate run found and decided
#[derive(Debug)]
pub struct GateReport {
    pub branch: String,
    pub commits: Vec<CommitId>,
    pub files: Vec<FileReport>,
    pub state: PushState,
    pub unstaged_overlap: BTreeSet<String>,
    pub verdict: Verdict,
}

impl GateReport {
    pub fn file(&self, path: &str) -> Option<&FileReport> {
        self.files.iter().find(|report| report.path == path)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|report| report.is_failed())
    }
}

/// The pre-push gate: discover files, run the rules, decide
pub struct Gate<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    root: PathBuf,
    rules: RuleSet,
}

impl<'a, V: VersionControl + ?Sized> Gate<'a, V> {
    /// `root` is the working tree root that repository paths are relative to
    pub fn new<P: AsRef<Path>>(vcs: &'a V, root: P, rules: RuleSet) -> Self {
        Self {
            vcs,
            root: root.as_ref().to_path_buf(),
            rules,
        }
    }

    /// Run the gate once
    ///
    /// Discovery failures and operator cancellation are returned as errors.
    /// Per-file problems are recorded in the report and do not stop the run.
    pub fn run(&self, prompt: &mut dyn Prompt) -> AppResult<GateReport> {
        let scope = discover_scope(self.vcs)?;
        info!(
            branch = %scope.branch,
            commits = scope.commits.len(),
            files = scope.files.len(),
            "Checking files of pending push"
        );

        let mut state = PushState::new();
        let mut files = Vec::with_capacity(scope.files.len());

        for path in &scope.files {
            let report = self.process_file(path, prompt, &mut state)?;
            files.push(report);
        }

        let overlap = self.verify_working_tree(&scope.files)?;
        let verdict = decide(state.any_mutation_made(), !overlap.is_empty());
        info!(%verdict, mutated = state.mutated_files().len(), "Gate decided");

        Ok(GateReport {
            branch: scope.branch,
            commits: scope.commits,
            files,
            state,
            unstaged_overlap: overlap,
            verdict,
        })
    }

    /// Take one file through every rule, in order
    ///
    /// Only fatal rule errors (operator cancellation, a dead terminal) escape;
    /// everything else ends up in the file's outcome.
    fn process_file(
        &self,
        path: &str,
        prompt: &mut dyn Prompt,
        state: &mut PushState,
    ) -> Result<FileReport, RuleError> {
        let full_path = self.root.join(path);

        if let Some(reason) = skip_reason(&full_path) {
            debug!(path, reason, "Skipping file");
            return Ok(FileReport {
                path: path.to_string(),
                outcome: FileOutcome::Skipped(reason.to_string()),
            });
        }

        prompt
            .say(&format!("Checking {}...", path))
            .map_err(RuleError::Prompt)?;

        let mut runs = Vec::new();

        for rule in self.rules.iter() {
            if !rule.applies_to(&full_path) {
                continue;
            }

            match rule.apply(&full_path, path, prompt) {
                Ok(result) => {
                    state.record(path, &result);
                    runs.push(RuleRun {
                        rule: rule.name(),
                        result,
                    });
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!(path, rule = rule.name(), error = %error, "Rule failed, skipping rest of file");
                    return Ok(FileReport {
                        path: path.to_string(),
                        outcome: FileOutcome::Failed {
                            completed: runs,
                            error,
                        },
                    });
                }
            }
        }

        Ok(FileReport {
            path: path.to_string(),
            outcome: FileOutcome::Done(runs),
        })
    }

    fn verify_working_tree(&self, files: &FileSet) -> AppResult<BTreeSet<String>> {
        let overlap = unstaged_overlap(self.vcs, files)?;
        if !overlap.is_empty() {
            debug!(files = ?overlap, "Working tree differs from the index");
        }
        Ok(overlap)
    }
}

/// Why a path cannot be checked, if it cannot
fn skip_reason(path: &Path) -> Option<&'static str> {
    match fs::symlink_metadata(path) {
        Err(_) => Some("no longer exists"),
        Ok(meta) if meta.file_type().is_symlink() => Some("symbolic link"),
        Ok(meta) if !meta.is_file() => Some("not a regular file"),
        Ok(_) => None,
    }
}
