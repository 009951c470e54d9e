use pushgate::audit::AuditLogger;
use pushgate::config::REPO_CONFIG_FILE;
use pushgate::gate::{FileOutcome, GateReport, Verdict};
use pushgate::hooks::{self, InstallOutcome};
use pushgate::{AppResult, Config, Gate, Repository, RuleSet, TerminalPrompt};
use std::env;
use std::io;
use std::process;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    init_logging();

    // git runs the hook as `pre-push <remote> <url>`; those arguments are not needed
    let args: Vec<String> = env::args().skip(1).collect();

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(code);
}

/// Diagnostics go to stderr so they never mix with the operator dialogue
fn init_logging() {
    let filter = EnvFilter::try_from_env("PUSHGATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pushgate=warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(args: &[String]) -> AppResult<i32> {
    let repo = Repository::discover()?;
    let verb: Vec<&str> = args.iter().map(String::as_str).collect();

    match verb.as_slice() {
        ["install"] => install(&repo, false),
        ["install", "--force"] => install(&repo, true),
        ["uninstall"] => {
            if hooks::uninstall_pre_push(&repo)? {
                println!("Removed pushgate pre-push hook");
            } else {
                println!("No pushgate pre-push hook installed");
            }
            Ok(0)
        }
        ["init-config"] => init_config(&repo),
        _ => run_gate(&repo),
    }
}

fn install(repo: &Repository, force: bool) -> AppResult<i32> {
    match hooks::install_pre_push(repo, force)? {
        InstallOutcome::Installed(path) => println!("Installed {}", path.display()),
        InstallOutcome::Replaced(path) => println!("Replaced {}", path.display()),
        InstallOutcome::AlreadyInstalled(path) => {
            println!("{} is already installed", path.display())
        }
    }
    Ok(0)
}

fn init_config(repo: &Repository) -> AppResult<i32> {
    let path = repo.path().join(REPO_CONFIG_FILE);
    if path.exists() {
        println!("{} already exists", path.display());
        return Ok(1);
    }

    Config::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(0)
}

fn run_gate(repo: &Repository) -> AppResult<i32> {
    let config = Config::load_for(repo.path())?;
    let audit = open_audit_log(&config);

    let gate = Gate::new(repo, repo.path(), RuleSet::from_config(&config));
    let mut prompt = TerminalPrompt::new();

    let report = match gate.run(&mut prompt) {
        Ok(report) => report,
        Err(e) => {
            if let Some(logger) = &audit {
                if let Err(log_err) = logger.log_failure(&e.to_string(), repo.path()) {
                    warn!(error = %log_err, "Failed to write audit log");
                }
            }
            return Err(e);
        }
    };

    print_summary(&report);

    if let Some(logger) = &audit {
        if let Err(e) = logger.log_run(&report, repo.path()) {
            warn!(error = %e, "Failed to write audit log");
        }
    }

    Ok(report.verdict.exit_code())
}

fn open_audit_log(config: &Config) -> Option<AuditLogger> {
    if !config.audit.enabled {
        return None;
    }

    let opened = config
        .audit_log_path()
        .map_err(|e| e.to_string())
        .and_then(|path| AuditLogger::with_path(path).map_err(|e| e.to_string()));

    match opened {
        Ok(logger) => Some(logger),
        Err(e) => {
            warn!(error = %e, "Audit log disabled for this run");
            None
        }
    }
}

fn print_summary(report: &GateReport) {
    for file in &report.files {
        match &file.outcome {
            FileOutcome::Failed { error, .. } => {
                println!("Could not check {}: {}", file.path, error)
            }
            FileOutcome::Skipped(reason) => println!("Skipped {} ({})", file.path, reason),
            FileOutcome::Done(_) => {}
        }
    }

    match report.verdict {
        Verdict::Allow => println!("All checks passed, continuing with push"),
        Verdict::Abort => {
            for path in report.state.mutated_files().union(&report.unstaged_overlap) {
                println!("  modified: {}", path);
            }
            println!("**Files have been edited. Please stage/re-commit your changes and push again**");
        }
    }
}
