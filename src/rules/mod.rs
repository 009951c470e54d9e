//! Check/fix rules applied to every file of a push.
//!
//! Each rule reads the current on-disk content and writes its fix back before
//! the next rule runs, so later rules see earlier fixes. The order is fixed:
//! [`debugger`], then [`whitespace`], then [`newline`].

pub mod debugger;
pub mod newline;
pub mod whitespace;

use crate::config::Config;
use crate::error::{RuleError, RuleOutcome};
use crate::prompt::Prompt;
use std::fs;
use std::path::Path;

pub use debugger::DebuggerRule;
pub use newline::TrailingNewlineRule;
pub use whitespace::TrailingWhitespaceRule;

/// What a rule found and did for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleResult {
    /// The rule's condition was detected
    pub triggered: bool,
    /// A fix was written back to disk
    pub mutated: bool,
}

impl RuleResult {
    pub fn clean() -> Self {
        Self::default()
    }

    /// Result of an automatic fix: triggered and mutated go together
    pub fn fixed(changed: bool) -> Self {
        Self {
            triggered: changed,
            mutated: changed,
        }
    }
}

/// A single check with an optional fix
pub trait Rule {
    /// Short identifier used in reports and logs
    fn name(&self) -> &'static str;

    /// Whether the rule looks at this file at all
    fn applies_to(&self, path: &Path) -> bool;

    /// Inspect the file at `path` and fix it in place if needed
    ///
    /// `shown` is the repository-relative name shown to the operator.
    fn apply(&self, path: &Path, shown: &str, prompt: &mut dyn Prompt) -> RuleOutcome<RuleResult>;
}

/// The enabled rules, in application order
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Build the rule list from configuration
    pub fn from_config(config: &Config) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        if config.rules.debugger {
            rules.push(Box::new(DebuggerRule::new(config.debugger.extensions.clone())));
        }
        if config.rules.trailing_whitespace {
            rules.push(Box::new(TrailingWhitespaceRule::new(
                config.whitespace.exempt_extensions.clone(),
            )));
        }
        if config.rules.trailing_newline {
            rules.push(Box::new(TrailingNewlineRule));
        }

        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|rule| rule.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Read a file as UTF-8 text
pub(crate) fn read_text(path: &Path) -> RuleOutcome<String> {
    let bytes = fs::read(path).map_err(|e| RuleError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| RuleError::NotText(path.to_path_buf()))
}

/// Replace the content of a file
pub(crate) fn write_text(path: &Path, content: &str) -> RuleOutcome<()> {
    fs::write(path, content).map_err(|e| RuleError::io(path, e))
}

/// Split text into lines that keep their terminator
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Split a line into its body and its terminator (`\r\n`, `\n` or nothing)
pub(crate) fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
