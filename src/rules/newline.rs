use super::{Rule, RuleResult, read_text, write_text};
use crate::error::RuleOutcome;
use crate::prompt::Prompt;
use std::path::Path;
use tracing::debug;

/// Makes every file end in exactly one newline
pub struct TrailingNewlineRule;

impl Rule for TrailingNewlineRule {
    fn name(&self) -> &'static str {
        "trailing-newline"
    }

    fn applies_to(&self, _path: &Path) -> bool {
        true
    }

    fn apply(&self, path: &Path, shown: &str, _prompt: &mut dyn Prompt) -> RuleOutcome<RuleResult> {
        let original = read_text(path)?;
        let normalized = normalize_trailing_newline(&original);

        if normalized == original {
            return Ok(RuleResult::clean());
        }

        write_text(path, &normalized)?;
        debug!(path = shown, "Normalized trailing newline");
        Ok(RuleResult::fixed(true))
    }
}

/// Collapse any run of trailing newlines (including none) into exactly one
pub fn normalize_trailing_newline(text: &str) -> String {
    let mut out = text.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}
