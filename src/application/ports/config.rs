//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted user preferences
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load preferences from storage.
    ///
    /// # Returns
    /// The loaded config, with every field `None` when no file exists yet
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save preferences to storage, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the defaults to a new file.
    /// Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
