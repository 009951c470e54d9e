#![allow(dead_code)]

use pushgate::{Answer, Prompt};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir`, panicking with its stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to create a test git repository on branch `main`
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "-b", "main"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);
    git(&repo_path, &["config", "core.autocrlf", "false"]);

    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    let file_path = repo_path.join(file);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(&file_path, content).expect("Failed to write file");

    git(repo_path, &["add", file]);
    git(repo_path, &["commit", "-m", message]);
}

/// Helper to add a bare remote called `origin` and push `main` to it
pub fn push_to_new_remote(repo_path: &Path) -> TempDir {
    let remote = TempDir::new().unwrap();
    git(remote.path(), &["init", "--bare"]);

    let url = remote.path().to_string_lossy().to_string();
    git(repo_path, &["remote", "add", "origin", &url]);
    git(repo_path, &["push", "-u", "origin", "main"]);

    remote
}

/// Prompt that replays canned answers and records the dialogue
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    pub transcript: Vec<String>,
    pub questions: usize,
}

impl ScriptedPrompt {
    pub fn new(answers: &[Answer]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            transcript: Vec::new(),
            questions: 0,
        }
    }

    pub fn silent() -> Self {
        Self::new(&[])
    }
}

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
