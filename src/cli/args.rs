//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::catalog::{Bucket, InstructionType};
use crate::domain::session::{SessionMode, SessionRequest, MEDITATION_MINUTES};

/// Meditation Player - gong, chanting and silent meditation sessions
#[derive(Parser, Debug)]
#[command(name = "meditation-player")]
#[command(version)]
#[command(about = "Play a meditation session: gong, chanting, silent countdown, closing")]
#[command(long_about = None)]
pub struct Cli {
    /// Session mode
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Skip the gong at the start of the session
    #[arg(long)]
    pub no_gong: bool,

    /// Opening chant length
    #[arg(short = 'i', long, value_name = "BUCKET")]
    pub intro: Option<BucketArg>,

    /// Closing chant length
    #[arg(short = 'o', long, value_name = "BUCKET")]
    pub outro: Option<BucketArg>,

    /// Silent meditation length in minutes (1, 5, 10, 15, 20, 25, 30, 45, 60)
    #[arg(short = 't', long, value_name = "MINUTES", value_parser = parse_minutes)]
    pub minutes: Option<u32>,

    /// Guided instruction length
    #[arg(long, value_name = "LENGTH")]
    pub instructions: Option<InstructionsArg>,

    /// Directory holding the audio files
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<String>,

    /// Catalog manifest path or http(s) URL
    #[arg(long, value_name = "LOCATION")]
    pub catalog: Option<String>,

    /// Chant fade-in in seconds (0 disables)
    #[arg(long = "fade-in", value_name = "SECS", value_parser = parse_fade_in)]
    pub fade_in: Option<f64>,

    /// Do not keep the screen awake during the session
    #[arg(long)]
    pub no_wake_lock: bool,

    /// Walk through the session without producing sound
    #[arg(long)]
    pub dry_run: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show what the catalog offers
    Catalog,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Session mode argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Custom,
    Guided,
}

impl From<ModeArg> for SessionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Custom => SessionMode::Custom,
            ModeArg::Guided => SessionMode::Guided,
        }
    }
}

/// Chanting bucket argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BucketArg {
    None,
    #[value(name = "2min")]
    TwoMin,
    #[value(name = "5min")]
    FiveMin,
    #[value(name = "10min")]
    TenMin,
}

impl From<BucketArg> for Bucket {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::None => Bucket::None,
            BucketArg::TwoMin => Bucket::TwoMin,
            BucketArg::FiveMin => Bucket::FiveMin,
            BucketArg::TenMin => Bucket::TenMin,
        }
    }
}

/// Instruction length argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InstructionsArg {
    Short,
    Long,
}

impl From<InstructionsArg> for InstructionType {
    fn from(arg: InstructionsArg) -> Self {
        match arg {
            InstructionsArg::Short => InstructionType::Short,
            InstructionsArg::Long => InstructionType::Long,
        }
    }
}

/// Parsed options for running a session
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub request: SessionRequest,
    pub fade_in_secs: f64,
    pub media_dir: String,
    pub catalog: String,
    pub wake_lock: bool,
    pub dry_run: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "mode",
    "gong",
    "intro",
    "outro",
    "minutes",
    "instructions",
    "fade_in_secs",
    "media_dir",
    "catalog",
    "wake_lock",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Parse a meditation length, accepting only the offered minute values
pub fn parse_minutes(value: &str) -> Result<u32, String> {
    let minutes: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of minutes", value))?;
    if MEDITATION_MINUTES.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(format!(
            "{} is not an offered length. Choose one of: {}",
            minutes,
            format_minutes()
        ))
    }
}

fn parse_fade_in(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(format!("'{}' is not a non-negative number of seconds", value)),
    }
}

fn format_minutes() -> String {
    MEDITATION_MINUTES
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
