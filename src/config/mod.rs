pub mod settings;

pub use settings::{
    AuditConfig, Config, ConfigError, DebuggerConfig, REPO_CONFIG_FILE, RulesConfig,
    WhitespaceConfig, has_extension,
};
