//! Rodio-based audio output adapter
//!
//! Decodes files with rodio and plays them on the default output device.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::application::ports::{AudioHandle, AudioOutput, PlaybackError};

/// Audio output using rodio.
///
/// The rodio output stream cannot move between threads, so it lives on a
/// dedicated thread for as long as this value exists. Sinks are created from
/// its handle.
pub struct RodioAudioOutput {
    stream: OutputStreamHandle,
    _keep_alive: mpsc::Sender<()>,
}

impl RodioAudioOutput {
    /// Open the default output device
    pub fn new() -> Result<Self, PlaybackError> {
        let (ready_tx, ready_rx) = mpsc::channel();
        let (keep_alive, shutdown_rx) = mpsc::channel::<()>();

        thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    let _ = ready_tx.send(Ok(handle));
                    // Returns once the sender side is dropped
                    let _ = shutdown_rx.recv();
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(PlaybackError::DeviceNotAvailable(e.to_string())));
                }
            })
            .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

        let stream = ready_rx
            .recv()
            .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))??;

        Ok(Self {
            stream,
            _keep_alive: keep_alive,
        })
    }
}

impl AudioOutput for RodioAudioOutput {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PlaybackError::NotFound(path.display().to_string())
            } else {
                PlaybackError::PlaybackFailed(format!("{}: {}", path.display(), e))
            }
        })?;

        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Decode(format!("{}: {}", path.display(), e)))?;
        let total = source.total_duration();

        let sink =
            Sink::try_new(&self.stream).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
        sink.append(source);

        Ok(Box::new(RodioHandle { sink, total }))
    }
}

struct RodioHandle {
    sink: Sink,
    total: Option<Duration>,
}

impl AudioHandle for RodioHandle {
    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn total(&self) -> Option<Duration> {
        self.total
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    fn stop(&self) {
        self.sink.stop();
    }
}
