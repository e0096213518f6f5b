//! Catalog of chant, gong and instruction audio

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ParseBucketError, ParseInstructionTypeError};

/// Chanting length category.
///
/// `None` means the user does not want a chant for that slot; it never has
/// catalog entries of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Bucket {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "2min")]
    TwoMin,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "10min")]
    TenMin,
}

impl Bucket {
    /// All buckets in picker order
    pub const ALL: [Bucket; 4] = [Self::None, Self::TwoMin, Self::FiveMin, Self::TenMin];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TwoMin => "2min",
            Self::FiveMin => "5min",
            Self::TenMin => "10min",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "2min" => Ok(Self::TwoMin),
            "5min" => Ok(Self::FiveMin),
            "10min" => Ok(Self::TenMin),
            _ => Err(ParseBucketError {
                input: s.to_string(),
            }),
        }
    }
}

/// Guided-instruction length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionType {
    #[default]
    Short,
    Long,
}

impl InstructionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstructionType {
    type Err = ParseInstructionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            _ => Err(ParseInstructionTypeError {
                input: s.to_string(),
            }),
        }
    }
}

/// One chant recording listed under a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChantEntry {
    /// File name relative to the chanting directory
    pub file: String,
    /// Length in seconds
    pub duration: f64,
}

/// Guided-instruction file pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionFiles {
    pub short: String,
    pub long: String,
}

impl InstructionFiles {
    pub fn file_for(&self, kind: InstructionType) -> &str {
        match kind {
            InstructionType::Short => &self.short,
            InstructionType::Long => &self.long,
        }
    }
}

fn default_gong() -> String {
    "gong.mp3".to_string()
}

fn default_closing() -> String {
    "closing.mp3".to_string()
}

/// Static manifest of available audio.
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub chanting: BTreeMap<Bucket, Vec<ChantEntry>>,
    #[serde(default = "default_gong")]
    pub gong: String,
    #[serde(default = "default_closing")]
    pub closing: String,
    #[serde(default)]
    pub instructions: Option<InstructionFiles>,
}

impl Catalog {
    /// Parse a JSON manifest
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Entries listed under a bucket (empty for `none` or unknown buckets)
    pub fn entries(&self, bucket: Bucket) -> &[ChantEntry] {
        if bucket.is_none() {
            return &[];
        }
        self.chanting.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            chanting: BTreeMap::new(),
            gong: default_gong(),
            closing: default_closing(),
            instructions: None,
        }
    }
}
