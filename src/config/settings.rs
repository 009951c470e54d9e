use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the per-repository config file, looked up in the repository root
pub const REPO_CONFIG_FILE: &str = ".pushgate.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub debugger: DebuggerConfig,
    pub whitespace: WhitespaceConfig,
    pub audit: AuditConfig,
}

/// Which rules run; order is fixed regardless of these switches
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub debugger: bool,
    pub trailing_whitespace: bool,
    pub trailing_newline: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DebuggerConfig {
    /// Script extensions checked for leftover `debugger` statements
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WhitespaceConfig {
    /// Extensions where trailing spaces are meaningful and must be kept
    pub exempt_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            debugger: true,
            trailing_whitespace: true,
            trailing_newline: true,
        }
    }
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string(), "coffee".to_string()],
        }
    }
}

impl Default for WhitespaceConfig {
    fn default() -> Self {
        Self {
            exempt_extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Config {
    /// Get the user-level config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("pushgate"))
    }

    /// Get the user-level config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the configuration that applies to a repository
    ///
    /// `<repo>/.pushgate.toml` wins over the user config; with neither present
    /// the built-in defaults apply.
    pub fn load_for(repo_root: &Path) -> Result<Self, ConfigError> {
        let repo_config = repo_root.join(REPO_CONFIG_FILE);
        if repo_config.is_file() {
            return Self::load_from(&repo_config);
        }

        match Self::config_path() {
            Ok(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("debugger.extensions", &self.debugger.extensions),
            ("whitespace.exempt_extensions", &self.whitespace.exempt_extensions),
        ];

        for (name, extensions) in lists {
            if extensions
                .iter()
                .any(|ext| ext.trim().trim_start_matches('.').is_empty())
            {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must not contain empty extensions",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Where gate runs are recorded
    pub fn audit_log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.audit.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("history.log")),
        }
    }
}

/// Whether `path` has one of `extensions` (case-insensitive, leading dot optional)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };

    extensions
        .iter()
        .any(|candidate| candidate.trim().trim_start_matches('.').eq_ignore_ascii_case(ext))
}
