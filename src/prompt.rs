//! Yes/no questions for the operator running the push.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::debug;

/// Operator reply to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Anything else; treated as no
    Unrecognized,
}

impl Answer {
    /// Interpret a line typed by the operator
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Answer::Yes,
            "n" | "no" => Answer::No,
            _ => Answer::Unrecognized,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

/// Synchronous channel to the operator
pub trait Prompt {
    /// Show a line of text to the operator
    fn say(&mut self, text: &str) -> io::Result<()>;

    /// Ask a question and wait for the reply
    ///
    /// `Ok(None)` means the input was closed, which the gate treats as the
    /// operator abandoning the push.
    fn ask(&mut self, question: &str) -> io::Result<Option<Answer>>;
}

/// Prompts on stdout and reads replies from the controlling terminal
///
/// git hands the pre-push hook the ref list on stdin, so replies are read
/// from `/dev/tty` when it can be opened and from stdin otherwise.
pub struct TerminalPrompt {
    input: Box<dyn BufRead>,
    on_terminal: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::from_tty(File::open("/dev/tty"))
    }

    fn from_tty(tty: io::Result<File>) -> Self {
        match tty {
            Ok(tty) => Self {
                input: Box::new(BufReader::new(tty)),
                on_terminal: true,
            },
            Err(e) => {
                // Under `git push` stdin carries the `<local ref> <sha> <remote ref> <sha>`
                // lines, so the first answers will parse as unrecognized (no)
                debug!(
                    error = %e,
                    "No controlling terminal, reading answers from stdin; git's ref lines will be read as \"no\""
                );
                Self {
                    input: Box::new(BufReader::new(io::stdin())),
                    on_terminal: false,
                }
            }
        }
    }

    /// Read answers from an arbitrary source
    pub fn from_reader<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            input: Box::new(reader),
            on_terminal: false,
        }
    }

    /// Whether answers come from the controlling terminal rather than stdin
    pub fn on_terminal(&self) -> bool {
        self.on_terminal
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn say(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<Answer>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{} ", question)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(Answer::parse(&line)))
    }
}

/// Replays canned answers and records everything shown to the operator
#[cfg(test)]
pub(crate) struct ScriptedPrompt {
    answers: std::collections::VecDeque<Answer>,
    pub(crate) transcript: Vec<String>,
    pub(crate) questions: usize,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub(crate) fn new(answers: &[Answer]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            transcript: Vec::new(),
            questions: 0,
        }
    }

    pub(crate) fn silent() -> Self {
        Self::new(&[])
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn say(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<Answer>> {
        self.questions += 1;
        self.transcript.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}
