//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Bucket, InstructionType};
use crate::domain::session::{SessionMode, SessionRequest};

/// Default media root, relative to the working directory
pub const DEFAULT_MEDIA_DIR: &str = "media";
/// Default catalog manifest location
pub const DEFAULT_CATALOG: &str = "media/metadata.json";
/// Default chant fade-in in seconds
pub const DEFAULT_FADE_IN_SECS: f64 = 3.0;
/// Default meditation length in minutes
pub const DEFAULT_MINUTES: u32 = 10;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub mode: Option<String>,
    pub gong: Option<bool>,
    pub intro: Option<String>,
    pub outro: Option<String>,
    pub minutes: Option<u32>,
    pub instructions: Option<String>,
    pub fade_in_secs: Option<f64>,
    pub media_dir: Option<String>,
    pub catalog: Option<String>,
    pub wake_lock: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            mode: Some("custom".to_string()),
            gong: Some(true),
            intro: Some("none".to_string()),
            outro: Some("none".to_string()),
            minutes: Some(DEFAULT_MINUTES),
            instructions: Some("short".to_string()),
            fade_in_secs: Some(DEFAULT_FADE_IN_SECS),
            media_dir: Some(DEFAULT_MEDIA_DIR.to_string()),
            catalog: Some(DEFAULT_CATALOG.to_string()),
            wake_lock: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            mode: other.mode.or(self.mode),
            gong: other.gong.or(self.gong),
            intro: other.intro.or(self.intro),
            outro: other.outro.or(self.outro),
            minutes: other.minutes.or(self.minutes),
            instructions: other.instructions.or(self.instructions),
            fade_in_secs: other.fade_in_secs.or(self.fade_in_secs),
            media_dir: other.media_dir.or(self.media_dir),
            catalog: other.catalog.or(self.catalog),
            wake_lock: other.wake_lock.or(self.wake_lock),
        }
    }

    /// Get mode as parsed SessionMode, or custom if not set/invalid
    pub fn mode_or_default(&self) -> SessionMode {
        self.mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get gong setting, or true if not set
    pub fn gong_or_default(&self) -> bool {
        self.gong.unwrap_or(true)
    }

    /// Get intro bucket, or none if not set/invalid
    pub fn intro_or_default(&self) -> Bucket {
        self.intro
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get outro bucket, or none if not set/invalid
    pub fn outro_or_default(&self) -> Bucket {
        self.outro
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get meditation minutes, or the default if not set or zero
    pub fn minutes_or_default(&self) -> u32 {
        self.minutes.filter(|m| *m > 0).unwrap_or(DEFAULT_MINUTES)
    }

    /// Get instruction type, or short if not set/invalid
    pub fn instructions_or_default(&self) -> InstructionType {
        self.instructions
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get chant fade-in, or the default if not set or negative
    pub fn fade_in_secs_or_default(&self) -> f64 {
        self.fade_in_secs
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(DEFAULT_FADE_IN_SECS)
    }

    pub fn media_dir_or_default(&self) -> &str {
        self.media_dir.as_deref().unwrap_or(DEFAULT_MEDIA_DIR)
    }

    pub fn catalog_or_default(&self) -> &str {
        self.catalog.as_deref().unwrap_or(DEFAULT_CATALOG)
    }

    /// Get wake lock setting, or true if not set
    pub fn wake_lock_or_default(&self) -> bool {
        self.wake_lock.unwrap_or(true)
    }

    /// Session choices described by this config
    pub fn session_request(&self) -> SessionRequest {
        SessionRequest {
            mode: self.mode_or_default(),
            enable_gong: self.gong_or_default(),
            intro: self.intro_or_default(),
            outro: self.outro_or_default(),
            meditation_minutes: self.minutes_or_default(),
            instruction_type: self.instructions_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.mode, Some("custom".to_string()));
        assert_eq!(config.gong, Some(true));
        assert_eq!(config.intro, Some("none".to_string()));
        assert_eq!(config.minutes, Some(10));
        assert_eq!(config.fade_in_secs, Some(3.0));
        assert_eq!(config.media_dir_or_default(), "media");
        assert_eq!(config.catalog_or_default(), "media/metadata.json");
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.mode.is_none());
        assert!(config.gong.is_none());
        assert!(config.minutes.is_none());
        assert!(config.catalog.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            mode: Some("custom".to_string()),
            minutes: Some(20),
            intro: Some("2min".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            mode: Some("guided".to_string()),
            minutes: None, // Should not override
            intro: Some("10min".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.mode, Some("guided".to_string()));
        assert_eq!(merged.minutes, Some(20)); // Kept from base
        assert_eq!(merged.intro, Some("10min".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            media_dir: Some("/srv/media".to_string()),
            gong: Some(false),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.media_dir, Some("/srv/media".to_string()));
        assert_eq!(merged.gong, Some(false));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig {
            mode: Some("freestyle".to_string()),
            intro: Some("3min".to_string()),
            instructions: Some("medium".to_string()),
            minutes: Some(0),
            fade_in_secs: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(config.mode_or_default(), SessionMode::Custom);
        assert_eq!(config.intro_or_default(), Bucket::None);
        assert_eq!(config.instructions_or_default(), InstructionType::Short);
        assert_eq!(config.minutes_or_default(), 10);
        assert_eq!(config.fade_in_secs_or_default(), 3.0);
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(config.gong_or_default());
        assert!(config.wake_lock_or_default());
    }

    #[test]
    fn session_request_reflects_choices() {
        let config = AppConfig {
            mode: Some("custom".to_string()),
            gong: Some(false),
            intro: Some("5min".to_string()),
            outro: Some("2min".to_string()),
            minutes: Some(30),
            instructions: Some("long".to_string()),
            ..Default::default()
        };
        let request = config.session_request();
        assert_eq!(request.mode, SessionMode::Custom);
        assert!(!request.enable_gong);
        assert_eq!(request.intro, Bucket::FiveMin);
        assert_eq!(request.outro, Bucket::TwoMin);
        assert_eq!(request.meditation_minutes, 30);
        assert_eq!(request.instruction_type, InstructionType::Long);
    }
}
