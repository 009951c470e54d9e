use crate::gate::GateReport;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only history of gate runs
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger writing to `path`, creating its directory
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Record the verdict of one gate run
    pub fn log_run(&self, report: &GateReport, repo_path: &Path) -> std::io::Result<()> {
        let mutated: Vec<&str> = report
            .state
            .mutated_files()
            .iter()
            .map(String::as_str)
            .collect();

        let entry = format!(
            "[verdict:{}] branch={} commits={} files={} failed={} mutated={}",
            report.verdict,
            report.branch,
            report.commits.len(),
            report.files.len(),
            report.failures().count(),
            mutated.join(",")
        );

        self.append(repo_path, &entry)
    }

    /// Record a run that ended in an error before reaching a verdict
    pub fn log_failure(&self, reason: &str, repo_path: &Path) -> std::io::Result<()> {
        self.append(repo_path, &format!("[FAILED] reason=\"{}\"", reason))
    }

    fn append(&self, repo_path: &Path, entry: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());

        let line = format!(
            "[{}] [{}] [{}] {}\n",
            timestamp,
            user,
            repo_path.display(),
            entry
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // history.log -> history.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
