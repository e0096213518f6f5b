//! Silent audio output adapter
//!
//! Used for dry runs. Checks that each file exists, then pretends to play
//! it for a fixed length without touching any device.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{AudioHandle, AudioOutput, PlaybackError};

/// Default pretend length of every file
pub const DEFAULT_CLIP_LENGTH: Duration = Duration::from_secs(3);

/// Audio output that plays nothing
pub struct SilentAudioOutput {
    clip_length: Duration,
}

impl SilentAudioOutput {
    /// Create a silent output with the default clip length
    pub fn new() -> Self {
        Self::with_clip_length(DEFAULT_CLIP_LENGTH)
    }

    /// Create a silent output where every file lasts `clip_length`
    pub fn with_clip_length(clip_length: Duration) -> Self {
        Self { clip_length }
    }
}

impl Default for SilentAudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for SilentAudioOutput {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::NotFound(path.display().to_string()));
        }
        tracing::debug!(path = %path.display(), "silent playback");
        Ok(Box::new(SilentHandle {
            started: Instant::now(),
            length: self.clip_length,
            stopped: AtomicBool::new(false),
        }))
    }
}

struct SilentHandle {
    started: Instant,
    length: Duration,
    stopped: AtomicBool,
}

impl AudioHandle for SilentHandle {
    fn set_volume(&self, _volume: f32) {}

    fn position(&self) -> Duration {
        self.started.elapsed().min(self.length)
    }

    fn total(&self) -> Option<Duration> {
        Some(self.length)
    }

    fn is_finished(&self) -> bool {
        self.stopped.load(Ordering::SeqCst) || self.started.elapsed() >= self.length
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
