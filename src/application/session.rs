//! Meditation session use case
//!
//! Drives a [`SessionMachine`] through its phases. For each phase the driver
//! starts one activity (a playback or the countdown) and then waits for
//! whichever comes first: the activity finishing or a user command. Both
//! paths advance through the same transition policy.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::domain::catalog::{AudioResource, Catalog, MediaLibrary};
use crate::domain::session::{
    audio_for, InvalidPhaseTransition, PhaseTicket, SessionConfig, SessionMachine, SessionPhase,
    SessionRequest, StartRefused,
};

use super::countdown::{Countdown, CountdownCompletion};
use super::playback::{AudioProgress, PlayOptions, PlaybackCompletion, PlaybackController};
use super::ports::{AudioOutput, PlaybackError};

/// Errors from the session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot start session: {0}")]
    Refused(#[from] StartRefused),

    #[error("{0}")]
    InvalidState(#[from] InvalidPhaseTransition),
}

/// User actions accepted while a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// End the current phase now and move to the next one
    Skip,
    /// Abandon the session and return to idle
    Stop,
}

/// Tunables that are not part of a session's configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionOptions {
    /// Fade-in applied to intro and outro chants, in seconds
    pub chant_fade_in_secs: f64,
}

/// How a phase's activity ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    Finished,
    Failed(PlaybackError),
    Cancelled,
}

enum Activity {
    Playback(PlaybackCompletion),
    Countdown(CountdownCompletion),
    Failed(PlaybackError),
    Nothing,
}

impl Activity {
    async fn finished(self) -> PhaseOutcome {
        match self {
            Self::Playback(completion) => match completion.wait().await {
                Ok(()) => PhaseOutcome::Finished,
                Err(PlaybackError::Cancelled) => PhaseOutcome::Cancelled,
                Err(e) => PhaseOutcome::Failed(e),
            },
            Self::Countdown(completion) => match completion.wait().await {
                Ok(()) => PhaseOutcome::Finished,
                Err(_) => PhaseOutcome::Cancelled,
            },
            Self::Failed(e) => PhaseOutcome::Failed(e),
            Self::Nothing => PhaseOutcome::Cancelled,
        }
    }
}

/// Session orchestrator
pub struct SessionOrchestrator<O: AudioOutput> {
    catalog: Option<Arc<Catalog>>,
    media: Option<MediaLibrary>,
    playback: PlaybackController<O>,
    countdown: Countdown,
    machine: SessionMachine,
    phase_tx: watch::Sender<SessionPhase>,
    options: SessionOptions,
    rng: StdRng,
}

impl<O: AudioOutput> SessionOrchestrator<O> {
    /// Create an idle orchestrator.
    ///
    /// `catalog` is `None` when the manifest could not be loaded; sessions
    /// then refuse to start.
    pub fn new(
        catalog: Option<Arc<Catalog>>,
        media_root: impl Into<PathBuf>,
        output: O,
        options: SessionOptions,
    ) -> Self {
        let media = catalog
            .as_ref()
            .map(|c| MediaLibrary::new(media_root, Arc::clone(c)));
        let (phase_tx, _) = watch::channel(SessionPhase::Idle);
        Self {
            catalog,
            media,
            playback: PlaybackController::new(output),
            countdown: Countdown::new(),
            machine: SessionMachine::new(),
            phase_tx,
            options,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for chant selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.machine.phase()
    }

    /// Configuration of the running session
    pub fn config(&self) -> Option<&SessionConfig> {
        self.machine.config()
    }

    /// Whether a session may be started at all
    pub fn can_start(&self) -> bool {
        self.catalog.is_some()
    }

    /// Subscribe to phase changes
    pub fn phases(&self) -> watch::Receiver<SessionPhase> {
        self.phase_tx.subscribe()
    }

    /// Subscribe to audio progress of the current phase
    pub fn audio_progress(&self) -> watch::Receiver<AudioProgress> {
        self.playback.progress()
    }

    /// Subscribe to remaining meditation seconds
    pub fn countdown_remaining(&self) -> watch::Receiver<u64> {
        self.countdown.remaining()
    }

    /// Resolve `request` into a configuration and enter the first phase.
    ///
    /// The phase is entered but not driven; call [`Self::drive`] to run it.
    pub fn start(&mut self, request: &SessionRequest) -> Result<SessionPhase, SessionError> {
        if self.phase().is_driven() {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase(),
                action: "start a session".to_string(),
            }
            .into());
        }
        let config = request.resolve(&mut self.rng, self.catalog.as_deref())?;
        tracing::info!(
            mode = %config.mode(),
            gong = config.enable_gong(),
            intro = ?config.intro_file(),
            outro = ?config.outro_file(),
            minutes = config.meditation_minutes(),
            "session configured"
        );
        self.machine.start(config)?;
        self.publish();
        Ok(self.phase())
    }

    /// Run phases until the session completes or is stopped.
    /// Returns the phase the session settled in.
    pub async fn drive(&mut self, commands: &mut mpsc::Receiver<SessionCommand>) -> SessionPhase {
        while self.phase().is_driven() {
            let ticket = self.machine.ticket();
            let finished = self.begin(ticket.phase).finished();
            tokio::pin!(finished);

            tokio::select! {
                outcome = &mut finished => {
                    self.settle(ticket, outcome);
                }
                Some(command) = commands.recv() => match command {
                    SessionCommand::Skip => {
                        self.skip();
                    }
                    SessionCommand::Stop => {
                        self.stop();
                    }
                },
            }
        }
        self.phase()
    }

    /// Apply the outcome of the activity started for `ticket`.
    ///
    /// Outcomes for a phase entry that is no longer current are dropped.
    /// Returns the phase entered, if any.
    pub fn settle(&mut self, ticket: PhaseTicket, outcome: PhaseOutcome) -> Option<SessionPhase> {
        if !self.machine.is_current(ticket) {
            tracing::debug!(phase = %ticket.phase, ?outcome, "discarding stale completion");
            return None;
        }
        match outcome {
            PhaseOutcome::Finished => {}
            PhaseOutcome::Failed(e) => {
                tracing::warn!(phase = %ticket.phase, error = %e, "playback failed, moving on");
            }
            PhaseOutcome::Cancelled => {
                tracing::debug!(phase = %ticket.phase, "activity cancelled");
                return None;
            }
        }
        self.halt();
        let next = self.machine.advance(ticket);
        self.publish();
        next
    }

    /// End the current phase and move on. Returns the phase entered, if any.
    pub fn skip(&mut self) -> Option<SessionPhase> {
        let ticket = self.machine.ticket();
        if !ticket.phase.is_driven() {
            return None;
        }
        tracing::debug!(phase = %ticket.phase, "skipping");
        self.halt();
        let next = self.machine.advance(ticket);
        self.publish();
        next
    }

    /// Abandon the session and return to idle
    pub fn stop(&mut self) {
        self.halt();
        let previous = self.machine.stop();
        if previous.is_driven() {
            tracing::info!(phase = %previous, "session stopped");
        }
        self.publish();
    }

    /// Leave a completed session so a new one can be configured
    pub fn new_session(&mut self) -> Result<(), SessionError> {
        self.machine.reset()?;
        self.publish();
        Ok(())
    }

    /// Start the activity that belongs to `phase`
    fn begin(&mut self, phase: SessionPhase) -> Activity {
        let Some(config) = self.machine.config() else {
            return Activity::Nothing;
        };
        tracing::info!(phase = %phase, "entering phase");

        if phase == SessionPhase::Meditation {
            let minutes = config.meditation_minutes();
            return Activity::Countdown(self.countdown.start(minutes));
        }
        if !phase.is_driven() {
            return Activity::Nothing;
        }

        let Some(resource) = audio_for(phase, config) else {
            return Activity::Failed(PlaybackError::NotFound(format!("no audio for {}", phase)));
        };
        let Some(path) = self.media.as_ref().and_then(|m| m.resolve(&resource)) else {
            return Activity::Failed(PlaybackError::NotFound(resource.to_string()));
        };
        let options = self.play_options(&resource);
        Activity::Playback(self.playback.play(&path, options))
    }

    fn play_options(&self, resource: &AudioResource) -> PlayOptions {
        match resource {
            AudioResource::Chant(_) => PlayOptions::fade_in_secs(self.options.chant_fade_in_secs),
            _ => PlayOptions::default(),
        }
    }

    /// Stop whatever plays or ticks for the current phase
    fn halt(&mut self) {
        self.playback.stop();
        self.countdown.stop();
    }

    fn publish(&self) {
        self.phase_tx.send_replace(self.machine.phase());
    }
}
