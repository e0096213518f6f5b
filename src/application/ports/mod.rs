//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_output;
pub mod catalog;
pub mod config;
pub mod screen_wake;

// Re-export common types
pub use audio_output::{AudioHandle, AudioOutput, PlaybackError};
pub use catalog::CatalogSource;
pub use config::ConfigStore;
pub use screen_wake::{ScreenWake, WakeError};
