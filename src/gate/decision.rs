use std::fmt;

/// Whether the push may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Abort,
}

impl Verdict {
    /// Process exit status handed back to git
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Allow => 0,
            Verdict::Abort => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Abort => "ABORT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combine both pieces of mutation evidence
///
/// Either signal alone is enough to abort: the in-process flag covers fixes
/// the rules report, the working tree check covers anything they did not.
pub fn decide(any_mutation_made: bool, unstaged_overlap: bool) -> Verdict {
    if any_mutation_made || unstaged_overlap {
        Verdict::Abort
    } else {
        Verdict::Allow
    }
}
