//! Audio output infrastructure adapters
//!
//! Plays session audio on the default device, or silently for dry runs.

mod rodio;
mod silent;

pub use rodio::RodioAudioOutput;
pub use silent::{SilentAudioOutput, DEFAULT_CLIP_LENGTH};

use crate::application::ports::{AudioOutput, PlaybackError};

/// Create an audio output adapter: silent for dry runs, rodio otherwise
pub fn create_audio_output(dry_run: bool) -> Result<Box<dyn AudioOutput>, PlaybackError> {
    if dry_run {
        Ok(Box::new(SilentAudioOutput::new()))
    } else {
        Ok(Box::new(RodioAudioOutput::new()?))
    }
}
