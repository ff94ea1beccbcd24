use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncConfigError {
    #[error("package.metadata.live-url section missing from manifest")]
    ConfigSectionNotFound,
    #[error("Environment Error: {0}")]
    EnvError(String),
    #[error("Config Error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for SyncConfigError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}
