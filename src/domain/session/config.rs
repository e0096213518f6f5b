//! Session configuration value object

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::{select_with_retry, Bucket, Catalog, InstructionType, DEFAULT_MAX_ATTEMPTS};
use crate::domain::error::ParseModeError;

/// Minute values offered by the meditation duration picker
pub const MEDITATION_MINUTES: &[u32] = &[1, 5, 10, 15, 20, 25, 30, 45, 60];

/// Whether a session uses discrete chants or spoken instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Custom,
    Guided,
}

impl SessionMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Guided => "guided",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "guided" => Ok(Self::Guided),
            _ => Err(ParseModeError {
                input: s.to_string(),
            }),
        }
    }
}

/// Which chant slot a bucket was chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChantSlot {
    Intro,
    Outro,
}

impl fmt::Display for ChantSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => write!(f, "intro"),
            Self::Outro => write!(f, "outro"),
        }
    }
}

/// Reasons a session cannot start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartRefused {
    #[error("Catalog is not loaded yet")]
    CatalogUnavailable,

    #[error("No {slot} chant available for bucket {bucket}")]
    ChantUnavailable { slot: ChantSlot, bucket: Bucket },

    #[error("Meditation length must be at least one minute")]
    InvalidMinutes,
}

/// What the user picked on the setup screen, before chant files are drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub mode: SessionMode,
    pub enable_gong: bool,
    pub intro: Bucket,
    pub outro: Bucket,
    pub meditation_minutes: u32,
    pub instruction_type: InstructionType,
}

impl Default for SessionRequest {
    fn default() -> Self {
        Self {
            mode: SessionMode::Custom,
            enable_gong: true,
            intro: Bucket::None,
            outro: Bucket::None,
            meditation_minutes: 10,
            instruction_type: InstructionType::Short,
        }
    }
}

impl SessionRequest {
    /// Draw chant files and freeze the request into a [`SessionConfig`].
    ///
    /// Refuses when the catalog is absent, or when a custom-mode slot asks for
    /// a bucket that has nothing to draw from.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        catalog: Option<&Catalog>,
    ) -> Result<SessionConfig, StartRefused> {
        let catalog = catalog.ok_or(StartRefused::CatalogUnavailable)?;

        match self.mode {
            SessionMode::Guided => Ok(SessionConfig::guided(
                self.enable_gong,
                self.meditation_minutes,
                self.instruction_type,
            )),
            SessionMode::Custom => {
                if self.meditation_minutes == 0 {
                    return Err(StartRefused::InvalidMinutes);
                }
                let intro = Self::draw(rng, catalog, ChantSlot::Intro, self.intro)?;
                let outro = Self::draw(rng, catalog, ChantSlot::Outro, self.outro)?;
                Ok(SessionConfig {
                    mode: SessionMode::Custom,
                    enable_gong: self.enable_gong,
                    intro_file: intro,
                    outro_file: outro,
                    meditation_minutes: self.meditation_minutes,
                    instruction_type: self.instruction_type,
                })
            }
        }
    }

    fn draw<R: Rng + ?Sized>(
        rng: &mut R,
        catalog: &Catalog,
        slot: ChantSlot,
        bucket: Bucket,
    ) -> Result<Option<String>, StartRefused> {
        if bucket.is_none() {
            return Ok(None);
        }
        select_with_retry(rng, Some(catalog), bucket, DEFAULT_MAX_ATTEMPTS)
            .map(|entry| Some(entry.file.clone()))
            .ok_or(StartRefused::ChantUnavailable { slot, bucket })
    }
}

/// Fully resolved choices driving one session run.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    mode: SessionMode,
    enable_gong: bool,
    intro_file: Option<String>,
    outro_file: Option<String>,
    meditation_minutes: u32,
    instruction_type: InstructionType,
}

impl SessionConfig {
    /// Custom session with already chosen chant files
    pub fn custom(
        enable_gong: bool,
        intro_file: Option<String>,
        outro_file: Option<String>,
        meditation_minutes: u32,
    ) -> Self {
        Self {
            mode: SessionMode::Custom,
            enable_gong,
            intro_file,
            outro_file,
            meditation_minutes,
            instruction_type: InstructionType::default(),
        }
    }

    /// Guided session; chant slots are unused
    pub fn guided(enable_gong: bool, meditation_minutes: u32, instruction_type: InstructionType) -> Self {
        Self {
            mode: SessionMode::Guided,
            enable_gong,
            intro_file: None,
            outro_file: None,
            meditation_minutes,
            instruction_type,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn enable_gong(&self) -> bool {
        self.enable_gong
    }

    pub fn intro_file(&self) -> Option<&str> {
        self.intro_file.as_deref()
    }

    pub fn outro_file(&self) -> Option<&str> {
        self.outro_file.as_deref()
    }

    pub fn meditation_minutes(&self) -> u32 {
        self.meditation_minutes
    }

    pub fn instruction_type(&self) -> InstructionType {
        self.instruction_type
    }

    pub fn is_guided(&self) -> bool {
        self.mode == SessionMode::Guided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ChantEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.chanting.insert(
            Bucket::TwoMin,
            vec![ChantEntry {
                file: "two.mp3".to_string(),
                duration: 120.0,
            }],
        );
        catalog.chanting.insert(
            Bucket::TenMin,
            vec![ChantEntry {
                file: "ten.mp3".to_string(),
                duration: 600.0,
            }],
        );
        catalog.chanting.insert(Bucket::FiveMin, Vec::new());
        catalog
    }

    #[test]
    fn resolves_custom_chants() {
        let request = SessionRequest {
            intro: Bucket::TwoMin,
            outro: Bucket::TenMin,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let config = request.resolve(&mut rng, Some(&catalog())).unwrap();
        assert_eq!(config.mode(), SessionMode::Custom);
        assert_eq!(config.intro_file(), Some("two.mp3"));
        assert_eq!(config.outro_file(), Some("ten.mp3"));
        assert_eq!(config.meditation_minutes(), 10);
    }

    #[test]
    fn none_buckets_leave_slots_empty() {
        let request = SessionRequest::default();
        let mut rng = StdRng::seed_from_u64(3);
        let config = request.resolve(&mut rng, Some(&catalog())).unwrap();
        assert!(config.intro_file().is_none());
        assert!(config.outro_file().is_none());
    }

    #[test]
    fn empty_bucket_refuses_start() {
        let request = SessionRequest {
            intro: Bucket::FiveMin,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let err = request.resolve(&mut rng, Some(&catalog())).unwrap_err();
        assert_eq!(
            err,
            StartRefused::ChantUnavailable {
                slot: ChantSlot::Intro,
                bucket: Bucket::FiveMin
            }
        );
        assert!(err.to_string().contains("5min"));
    }

    #[test]
    fn missing_catalog_refuses_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = SessionRequest::default().resolve(&mut rng, None).unwrap_err();
        assert_eq!(err, StartRefused::CatalogUnavailable);
    }

    #[test]
    fn zero_minutes_refuses_start() {
        let request = SessionRequest {
            meditation_minutes: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            request.resolve(&mut rng, Some(&catalog())).unwrap_err(),
            StartRefused::InvalidMinutes
        );
    }

    #[test]
    fn guided_ignores_chant_buckets() {
        let request = SessionRequest {
            mode: SessionMode::Guided,
            intro: Bucket::FiveMin,
            outro: Bucket::TwoMin,
            instruction_type: InstructionType::Long,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let config = request.resolve(&mut rng, Some(&catalog())).unwrap();
        assert!(config.is_guided());
        assert!(config.intro_file().is_none());
        assert!(config.outro_file().is_none());
        assert_eq!(config.instruction_type(), InstructionType::Long);
    }

    #[test]
    fn mode_parse() {
        assert_eq!("Guided".parse::<SessionMode>().unwrap(), SessionMode::Guided);
        assert!("freestyle".parse::<SessionMode>().is_err());
    }
}
