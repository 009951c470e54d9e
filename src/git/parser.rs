use crate::error::{GitError, GitResult};

/// Opaque identifier of a commit (the full object hash)
pub type CommitId = String;

/// Parse `git rev-list` style output into commit ids, preserving order
///
/// Every character that is not an ASCII letter or digit is dropped, so graph
/// decorations (`* `, `| `) and stray whitespace are tolerated. Lines that end
/// up empty are skipped. A line that still does not look like an object hash
/// is a parse error.
pub fn parse_commit_ids(output: &str) -> GitResult<Vec<CommitId>> {
    let mut ids = Vec::new();

    for line in output.lines() {
        let id: String = line.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if id.is_empty() {
            continue;
        }

        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitError::ParseError(format!(
                "Unexpected commit id: {}",
                line.trim()
            )));
        }

        ids.push(id);
    }

    Ok(ids)
}

/// Parse a newline separated list of paths (`diff-tree --name-only`, `ls-files`)
///
/// Trailing whitespace is part of neither the path identity nor the output
/// format, so each entry is trimmed at the end. Blank lines are skipped.
pub fn parse_path_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
