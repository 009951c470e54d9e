use super::{Rule, RuleResult, read_text, split_lines, split_terminator, write_text};
use crate::config::has_extension;
use crate::error::{RuleError, RuleOutcome};
use crate::prompt::{Answer, Prompt};
use std::path::Path;
use tracing::info;

/// Literal breakpoint token looked for in script sources
pub const DEBUGGER_TOKEN: &str = "debugger";

/// Lines of context shown on each side of a match
const CONTEXT_LINES: usize = 2;

/// Finds leftover `debugger` statements and removes them one by one, each
/// only after the operator agrees
pub struct DebuggerRule {
    extensions: Vec<String>,
}

impl DebuggerRule {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }
}

impl Rule for DebuggerRule {
    fn name(&self) -> &'static str {
        "debugger"
    }

    fn applies_to(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }

    fn apply(&self, path: &Path, shown: &str, prompt: &mut dyn Prompt) -> RuleOutcome<RuleResult> {
        let original = read_text(path)?;
        say(prompt, "Checking for debugger statements left behind...")?;

        let review = review_debugger_statements(&original, shown, prompt)?;

        if review.result.mutated {
            write_text(path, &review.content)?;
            info!(path = shown, removed = review.removed, "Removed debugger statements");
        }

        Ok(review.result)
    }
}

/// Outcome of walking a file's text with the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerReview {
    pub content: String,
    pub result: RuleResult,
    /// Number of occurrences the operator agreed to remove
    pub removed: usize,
}

/// Lines that cannot hold a live statement: blank lines, comments and lines
/// opening with a string literal
pub fn is_exempt_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with(['"', '\'', '#'])
        || trimmed.starts_with("//")
}

/// What the operator sees when asking to view an occurrence
///
/// `idx` is zero-based. Near the start or end of the file only the matching
/// line is shown; elsewhere two lines either side are included.
pub fn context_window(lines: &[&str], idx: usize) -> String {
    let single = idx < CONTEXT_LINES || idx + CONTEXT_LINES >= lines.len();
    let window = if single {
        &lines[idx..=idx]
    } else {
        &lines[idx - CONTEXT_LINES..=idx + CONTEXT_LINES]
    };

    let text: String = window.concat();
    text.trim_end_matches(['\r', '\n']).to_string()
}

/// Remove the token at `pos` in `line`, together with a directly following `;`
fn remove_occurrence(line: &mut String, pos: usize) {
    let mut end = pos + DEBUGGER_TOKEN.len();
    if line[end..].starts_with(';') {
        end += 1;
    }
    line.replace_range(pos..end, "");
}

fn say(prompt: &mut dyn Prompt, text: &str) -> RuleOutcome<()> {
    prompt.say(text).map_err(RuleError::Prompt)
}

fn ask(prompt: &mut dyn Prompt, question: &str) -> RuleOutcome<Answer> {
    match prompt.ask(question).map_err(RuleError::Prompt)? {
        Some(answer) => Ok(answer),
        None => Err(RuleError::Cancelled),
    }
}

/// Walk `text` line by line and offer to remove every live `debugger` token
///
/// Every occurrence gets its own pair of questions (view it? remove it?).
/// A line emptied by a removal is dropped entirely. Declining leaves the
/// text untouched. Closing the input aborts with `RuleError::Cancelled`.
pub fn review_debugger_statements(
    text: &str,
    shown: &str,
    prompt: &mut dyn Prompt,
) -> RuleOutcome<DebuggerReview> {
    let lines = split_lines(text);
    let mut content = String::with_capacity(text.len());
    let mut result = RuleResult::clean();
    let mut removed = 0;

    for (idx, line) in lines.iter().enumerate() {
        if is_exempt_line(line) || !line.contains(DEBUGGER_TOKEN) {
            content.push_str(line);
            continue;
        }

        let mut current = line.to_string();
        let mut search_from = 0;
        let mut line_changed = false;

        while let Some(offset) = current[search_from..].find(DEBUGGER_TOKEN) {
            let pos = search_from + offset;
            result.triggered = true;

            let view = ask(
                prompt,
                &format!(" found debugger in {} would you like to see instance [y/n]:", shown),
            )?;
            if view.is_yes() {
                say(prompt, &format!("{}:{}", shown, idx + 1))?;
                say(prompt, &context_window(&lines, idx))?;
            }

            let remove = ask(
                prompt,
                "> Remove this debugger statement? [y/n] Ctrl-c to exit and abort push at any time:",
            )?;
            if remove.is_yes() {
                remove_occurrence(&mut current, pos);
                search_from = pos;
                line_changed = true;
                removed += 1;
                say(prompt, "replaced!")?;
            } else {
                search_from = pos + DEBUGGER_TOKEN.len();
            }
        }

        if line_changed {
            result.mutated = true;
            let (body, _) = split_terminator(&current);
            if body.trim().is_empty() {
                continue;
            }
        }

        content.push_str(&current);
    }

    Ok(DebuggerReview {
        content,
        result,
        removed,
    })
}
