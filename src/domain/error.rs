//! Domain error types

use thiserror::Error;

/// Error when parsing a chanting bucket string
#[derive(Debug, Clone, Error)]
#[error("Invalid bucket: \"{input}\". Valid buckets are: none, 2min, 5min, 10min")]
pub struct ParseBucketError {
    pub input: String,
}

/// Error when parsing a session mode string
#[derive(Debug, Clone, Error)]
#[error("Invalid mode: \"{input}\". Valid modes are: custom, guided")]
pub struct ParseModeError {
    pub input: String,
}

/// Error when parsing a guided-instruction type string
#[derive(Debug, Clone, Error)]
#[error("Invalid instruction type: \"{input}\". Valid types are: short, long")]
pub struct ParseInstructionTypeError {
    pub input: String,
}

/// Error when the catalog manifest cannot be obtained
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(String),

    #[error("Failed to fetch catalog: {0}")]
    FetchError(String),

    #[error("Failed to parse catalog: {0}")]
    ParseError(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
