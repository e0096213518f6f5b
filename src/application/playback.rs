//! Audio playback controller
//!
//! Owns at most one playing handle. Starting a new sound tears the previous
//! one down first. Progress is published on a watch channel every tick and
//! the caller gets a completion that resolves once, with either the natural
//! end or a load failure.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::ports::{AudioHandle, AudioOutput, PlaybackError};

/// Interval between progress updates and fade steps
pub const TICK: Duration = Duration::from_millis(100);

/// Position of the current sound.
/// Reset to zero whenever playback stops or changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioProgress {
    pub current_secs: f64,
    pub total_secs: f64,
}

impl AudioProgress {
    fn of(handle: &dyn AudioHandle) -> Self {
        Self {
            current_secs: handle.position().as_secs_f64(),
            total_secs: handle.total().map(|d| d.as_secs_f64()).unwrap_or(0.0),
        }
    }
}

/// Options for a single `play` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayOptions {
    /// Ramp the level linearly from silence to full over this long
    pub fade_in: Option<Duration>,
}

impl PlayOptions {
    pub fn fade_in_secs(secs: f64) -> Self {
        let fade_in = (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs));
        Self { fade_in }
    }
}

/// Resolves once when the sound ends, fails to load, or is stopped
#[derive(Debug)]
pub struct PlaybackCompletion {
    rx: oneshot::Receiver<Result<(), PlaybackError>>,
}

impl PlaybackCompletion {
    fn resolved(result: Result<(), PlaybackError>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    /// Wait for the outcome. A stopped playback yields `PlaybackError::Cancelled`.
    pub async fn wait(self) -> Result<(), PlaybackError> {
        self.rx.await.unwrap_or(Err(PlaybackError::Cancelled))
    }
}

struct ActivePlayback {
    handle: Arc<dyn AudioHandle>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Plays one sound at a time on an [`AudioOutput`]
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    active: Option<ActivePlayback>,
    progress: Arc<watch::Sender<AudioProgress>>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create an idle controller
    pub fn new(output: O) -> Self {
        let (progress, _) = watch::channel(AudioProgress::default());
        Self {
            output,
            active: None,
            progress: Arc::new(progress),
        }
    }

    /// Subscribe to progress updates
    pub fn progress(&self) -> watch::Receiver<AudioProgress> {
        self.progress.subscribe()
    }

    /// Whether a handle is currently held and still playing
    pub fn is_playing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.task.is_finished())
    }

    /// Start playing `path`, stopping whatever played before.
    ///
    /// Must be called from within a tokio runtime.
    pub fn play(&mut self, path: &Path, options: PlayOptions) -> PlaybackCompletion {
        self.stop();

        let handle: Arc<dyn AudioHandle> = match self.output.open(path) {
            Ok(handle) => Arc::from(handle),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open audio");
                return PlaybackCompletion::resolved(Err(e));
            }
        };

        let fade_in = options.fade_in.filter(|d| !d.is_zero());
        handle.set_volume(if fade_in.is_some() { 0.0 } else { 1.0 });
        self.progress.send_replace(AudioProgress::of(handle.as_ref()));
        tracing::debug!(path = %path.display(), ?fade_in, "playback started");

        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(drive_playback(
            Arc::clone(&handle),
            fade_in,
            Arc::clone(&self.progress),
            cancel.clone(),
            tx,
        ));

        self.active = Some(ActivePlayback {
            handle,
            cancel,
            task,
        });
        PlaybackCompletion { rx }
    }

    /// Stop and release the current handle. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.task.abort();
            active.handle.stop();
        }
        self.progress.send_replace(AudioProgress::default());
    }
}

impl<O: AudioOutput> Drop for PlaybackController<O> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive_playback(
    handle: Arc<dyn AudioHandle>,
    mut fade_in: Option<Duration>,
    progress: Arc<watch::Sender<AudioProgress>>,
    cancel: CancellationToken,
    done: oneshot::Sender<Result<(), PlaybackError>>,
) {
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut steps: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }

        if let Some(fade) = fade_in {
            let level = (f64::from(steps) * TICK.as_secs_f64() / fade.as_secs_f64()).min(1.0);
            handle.set_volume(level as f32);
            steps += 1;
            if level >= 1.0 {
                fade_in = None;
            }
        }

        if handle.is_finished() {
            progress.send_replace(AudioProgress::default());
            let _ = done.send(Ok(()));
            return;
        }
        progress.send_replace(AudioProgress::of(handle.as_ref()));
    }
}
