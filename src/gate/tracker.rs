use super::resolver::FileSet;
use crate::error::GitResult;
use crate::git::VersionControl;
use crate::rules::RuleResult;
use std::collections::BTreeSet;

/// Mutation evidence gathered during one gate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushState {
    any_mutation_made: bool,
    mutated_files: BTreeSet<String>,
}

impl PushState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one rule result for `path` into the state
    pub fn record(&mut self, path: &str, result: &RuleResult) {
        if result.mutated {
            self.any_mutation_made = true;
            self.mutated_files.insert(path.to_string());
        }
    }

    pub fn any_mutation_made(&self) -> bool {
        self.any_mutation_made
    }

    /// Files some rule rewrote, in path order
    pub fn mutated_files(&self) -> &BTreeSet<String> {
        &self.mutated_files
    }
}

/// Files of the push that now have unstaged modifications in the working tree
///
/// This is checked against git independently of what the rules reported.
pub fn unstaged_overlap<V: VersionControl + ?Sized>(
    vcs: &V,
    files: &FileSet,
) -> GitResult<BTreeSet<String>> {
    let modified = vcs.files_with_unstaged_modifications()?;
    Ok(modified.intersection(files).cloned().collect())
}
