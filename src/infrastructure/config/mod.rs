//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Database path that selects the volatile in-memory store
pub const MEMORY_DATABASE: &str = "memory";

/// Board configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_DATABASE
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct QueueConfig {
    pub mode: QueueMode,
}

/// How send commands reach the handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    /// Handle inside the request
    #[default]
    Sync,
    /// Hand off to a background worker
    Async,
}

impl std::str::FromStr for QueueMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sync" => Ok(QueueMode::Sync),
            "async" => Ok(QueueMode::Async),
            other => Err(ConfigError::InvalidValue(format!("queue mode: {}", other))),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("message-board.db"),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise defaults plus environment overrides
    pub fn load_or_env(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_or_lookup(path, |key| std::env::var(key).ok())
    }

    fn load_or_lookup(
        path: impl Into<PathBuf>,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.exists() {
            return Self::load(path);
        }

        tracing::warn!("Config {} not found, using defaults and environment", path.display());
        let mut config = Config::default();
        config.apply_env(get)?;
        Ok(config)
    }

    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `BOARD_*` overrides read through `get`
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bind) = get("BOARD_BIND_ADDRESS") {
            self.server.bind_address = bind;
        }

        if let Some(path) = get("BOARD_DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(mode) = get("BOARD_QUEUE_MODE") {
            self.queue.mode = mode.parse()?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("server.bind-address".to_string()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("database.path".to_string()));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to render config: {}", e)))
    }
}
