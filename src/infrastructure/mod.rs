//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio device, the filesystem, HTTP and systemd.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod wake;

// Re-export adapters
pub use audio::{create_audio_output, RodioAudioOutput, SilentAudioOutput};
pub use catalog::{create_catalog_source, FileCatalogSource, HttpCatalogSource};
pub use config::XdgConfigStore;
pub use wake::{create_screen_wake, InhibitScreenWake, NoOpScreenWake};
