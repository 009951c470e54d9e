use super::{Rule, RuleResult, read_text, split_lines, split_terminator, write_text};
use crate::config::has_extension;
use crate::error::RuleOutcome;
use crate::prompt::Prompt;
use std::path::Path;
use tracing::debug;

/// Removes spaces and tabs at the end of every line
///
/// Documentation formats listed in `exempt_extensions` are left alone since
/// Markdown uses two trailing spaces as a hard line break.
pub struct TrailingWhitespaceRule {
    exempt_extensions: Vec<String>,
}

impl TrailingWhitespaceRule {
    pub fn new(exempt_extensions: Vec<String>) -> Self {
        Self { exempt_extensions }
    }
}

impl Rule for TrailingWhitespaceRule {
    fn name(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn applies_to(&self, path: &Path) -> bool {
        !has_extension(path, &self.exempt_extensions)
    }

    fn apply(&self, path: &Path, shown: &str, _prompt: &mut dyn Prompt) -> RuleOutcome<RuleResult> {
        let original = read_text(path)?;
        let stripped = strip_trailing_whitespace(&original);

        if stripped == original {
            return Ok(RuleResult::clean());
        }

        write_text(path, &stripped)?;
        debug!(path = shown, "Removed trailing whitespace");
        Ok(RuleResult::fixed(true))
    }
}

/// Strip trailing spaces and tabs from each line, keeping line terminators
pub fn strip_trailing_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in split_lines(text) {
        let (body, terminator) = split_terminator(line);
        out.push_str(body.trim_end_matches([' ', '\t']));
        out.push_str(terminator);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_strip_spaces_and_tabs() {
        assert_eq!(strip_trailing_whitespace("a  \nb\t\t\nc"), "a\nb\nc");
        assert_eq!(strip_trailing_whitespace("last line  "), "last line");
    }

    #[test]
    fn test_keeps_leading_and_inner_whitespace() {
        let text = "  indented\tvalue\n\tfn x() {}\n";
        assert_eq!(strip_trailing_whitespace(text), text);
    }

    #[test]
    fn test_crlf_terminators_survive() {
        assert_eq!(strip_trailing_whitespace("a \r\nb\t\r\n"), "a\r\nb\r\n");
    }

    #[test]
    fn test_whitespace_only_lines_become_empty() {
        assert_eq!(strip_trailing_whitespace("a\n   \n\t\nb\n"), "a\n\n\nb\n");
    }

    #[test]
    fn test_idempotent() {
        let once = strip_trailing_whitespace("x = 1;   \n  \ny = 2;\t\n");
        assert_eq!(strip_trailing_whitespace(&once), once);
    }

    #[test]
    fn test_markdown_is_exempt() {
        let rule = TrailingWhitespaceRule::new(vec!["md".to_string(), "markdown".to_string()]);

        assert!(!rule.applies_to(Path::new("README.md")));
        assert!(!rule.applies_to(Path::new("docs/guide.markdown")));
        assert!(rule.applies_to(Path::new("src/app.js")));
        assert!(rule.applies_to(Path::new("Makefile")));
    }

    #[test]
    fn test_apply_rewrites_only_when_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.py");
        let rule = TrailingWhitespaceRule::new(Vec::new());

        fs::write(&path, "x = 1  \n").unwrap();
        let first = rule.apply(&path, "app.py", &mut ScriptedPrompt::silent()).unwrap();
        assert_eq!(first, RuleResult { triggered: true, mutated: true });
        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");

        let second = rule.apply(&path, "app.py", &mut ScriptedPrompt::silent()).unwrap();
        assert_eq!(second, RuleResult::clean());
    }
}
