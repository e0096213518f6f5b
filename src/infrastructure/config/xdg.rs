//! Preferences file under the XDG config home
//!
//! The file is plain TOML and may be edited by hand. On load, stored values
//! the player cannot run with are dropped with a warning, so the default or
//! command-line layer applies instead of a refused start. Choice values are
//! brought to their canonical spelling.

use std::fmt::{Debug, Display};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::catalog::{Bucket, InstructionType};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::session::{SessionMode, MEDITATION_MINUTES};

/// Directory under the XDG config home
pub const APP_DIR: &str = "meditation-player";

const FILE_NAME: &str = "config.toml";

const HEADER: &str = "# meditation-player preferences\n\
# Edit by hand or with `meditation-player config set <key> <value>`\n\n";

/// Preferences stored as `$XDG_CONFIG_HOME/meditation-player/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self {
            path: default_path(),
        }
    }

    /// Store at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(FILE_NAME)
}

/// Keep only the stored values a session can be built from
fn sanitize(stored: AppConfig) -> AppConfig {
    AppConfig {
        mode: canonical::<SessionMode>("mode", stored.mode),
        gong: stored.gong,
        intro: canonical::<Bucket>("intro", stored.intro),
        outro: canonical::<Bucket>("outro", stored.outro),
        minutes: stored
            .minutes
            .filter(|m| keep("minutes", m, MEDITATION_MINUTES.contains(m))),
        instructions: canonical::<InstructionType>("instructions", stored.instructions),
        fade_in_secs: stored
            .fade_in_secs
            .filter(|s| keep("fade_in_secs", s, s.is_finite() && *s >= 0.0)),
        media_dir: stored
            .media_dir
            .filter(|d| keep("media_dir", d, !d.trim().is_empty())),
        catalog: stored
            .catalog
            .filter(|c| keep("catalog", c, !c.trim().is_empty())),
        wake_lock: stored.wake_lock,
    }
}

fn canonical<T: FromStr + Display>(key: &'static str, value: Option<String>) -> Option<String> {
    let value = value?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed.to_string()),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring stored config value");
            None
        }
    }
}

fn keep<V: Debug>(key: &'static str, value: &V, valid: bool) -> bool {
    if !valid {
        tracing::warn!(key, value = ?value, "ignoring stored config value");
    }
    valid
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::empty()),
            Err(e) => {
                return Err(ConfigError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let stored: AppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(sanitize(stored))
    }

    /// Writes next to the target and renames over it, so an interrupted
    /// write never leaves a truncated file behind.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        let body =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(write_error)?;
        }

        let staging = self.staging_path();
        fs::write(&staging, format!("{}{}", HEADER, body))
            .await
            .map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}
