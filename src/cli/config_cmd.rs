//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::catalog::{Bucket, InstructionType};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::session::SessionMode;

use super::args::{is_valid_config_key, parse_minutes, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate `value` for `key` and store it, normalized, in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "mode" => {
            let mode: SessionMode = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.mode = Some(mode.to_string());
        }
        "intro" | "outro" => {
            let bucket: Bucket = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            let slot = if key == "intro" {
                &mut config.intro
            } else {
                &mut config.outro
            };
            *slot = Some(bucket.to_string());
        }
        "instructions" => {
            let kind: InstructionType = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.instructions = Some(kind.to_string());
        }
        "minutes" => config.minutes = Some(parse_minutes(value).map_err(invalid)?),
        "fade_in_secs" => {
            let secs = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| invalid("Value must be a non-negative number".to_string()))?;
            config.fade_in_secs = Some(secs);
        }
        "gong" => config.gong = Some(parse_bool(value).map_err(|_| invalid(bool_message()))?),
        "wake_lock" => {
            config.wake_lock = Some(parse_bool(value).map_err(|_| invalid(bool_message()))?)
        }
        "media_dir" => config.media_dir = Some(non_empty(value).map_err(invalid)?),
        "catalog" => config.catalog = Some(non_empty(value).map_err(invalid)?),
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "mode" => config.mode.clone(),
        "gong" => config.gong.map(|b| b.to_string()),
        "intro" => config.intro.clone(),
        "outro" => config.outro.clone(),
        "minutes" => config.minutes.map(|m| m.to_string()),
        "instructions" => config.instructions.clone(),
        "fade_in_secs" => config.fade_in_secs.map(|s| s.to_string()),
        "media_dir" => config.media_dir.clone(),
        "catalog" => config.catalog.clone(),
        "wake_lock" => config.wake_lock.map(|b| b.to_string()),
        _ => None,
    }
}

fn bool_message() -> String {
    "Value must be 'true' or 'false'".to_string()
}

fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("Value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn apply_normalizes_values() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "mode", "Guided").unwrap();
        apply_value(&mut config, "intro", "5MIN").unwrap();
        apply_value(&mut config, "instructions", " long ").unwrap();
        assert_eq!(config.mode, Some("guided".to_string()));
        assert_eq!(config.intro, Some("5min".to_string()));
        assert_eq!(config.instructions, Some("long".to_string()));
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "outro", "3min").is_err());
        assert!(apply_value(&mut config, "minutes", "7").is_err());
        assert!(apply_value(&mut config, "fade_in_secs", "-1").is_err());
        assert!(apply_value(&mut config, "gong", "maybe").is_err());
        assert!(apply_value(&mut config, "media_dir", "  ").is_err());
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn read_value_formats_numbers_and_flags() {
        let config = AppConfig {
            minutes: Some(45),
            wake_lock: Some(false),
            ..Default::default()
        };
        assert_eq!(read_value(&config, "minutes"), Some("45".to_string()));
        assert_eq!(read_value(&config, "wake_lock"), Some("false".to_string()));
        assert_eq!(read_value(&config, "catalog"), None);
    }

    #[tokio::test]
    async fn set_persists_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "minutes", "30").await.unwrap();
        handle_set(&store, &presenter, "gong", "no").await.unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.minutes, Some(30));
        assert_eq!(config.gong, Some(false));
    }

    #[tokio::test]
    async fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_get(&store, &presenter, "volume").await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
