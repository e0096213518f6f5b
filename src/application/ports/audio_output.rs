//! Audio output port
//!
//! The playback controller decides what plays, for how long and how loud.
//! Adapters behind this port only open files and drive the device.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while opening or playing audio
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The file does not exist
    #[error("Audio file not found: {0}")]
    NotFound(String),

    /// The file exists but could not be decoded
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to play the audio
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Playback was stopped before it finished
    #[error("Playback was cancelled")]
    Cancelled,
}

/// One opened, playing sound
pub trait AudioHandle: Send + Sync {
    /// Set output level, 0.0 to 1.0
    fn set_volume(&self, volume: f32);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total length, when the decoder knows it
    fn total(&self) -> Option<Duration>;

    /// Whether playback reached its natural end
    fn is_finished(&self) -> bool;

    /// Halt playback and release the device
    fn stop(&self);
}

/// Port for opening audio files on an output device
pub trait AudioOutput: Send + Sync {
    /// Open `path` and start playing it immediately.
    ///
    /// # Returns
    /// A handle for the playing sound, or an error if the file is missing or
    /// cannot be decoded
    fn open(&self, path: &Path) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

/// Blanket implementation for boxed output types
impl AudioOutput for Box<dyn AudioOutput> {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        self.as_ref().open(path)
    }
}
