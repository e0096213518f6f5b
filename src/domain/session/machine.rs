//! Session state machine

use thiserror::Error;

use super::config::SessionConfig;
use super::phase::SessionPhase;
use super::policy::{first_phase, next_phase};

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid phase transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: SessionPhase,
    pub action: String,
}

/// Identifies one entry into a phase.
///
/// Completions carry the ticket of the phase they were started for. A ticket
/// only matches while that exact entry is still current, so a completion
/// that arrives after a skip or stop no longer matches and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTicket {
    pub phase: SessionPhase,
    epoch: u64,
}

/// Session state machine.
/// Owns the current phase and the configuration of the running session.
///
/// State machine:
///   IDLE | COMPLETE -> first phase (start)
///   driven phase -> next phase (advance, on completion or skip)
///   any -> IDLE (stop)
///   COMPLETE -> IDLE (reset)
#[derive(Debug, Default)]
pub struct SessionMachine {
    phase: SessionPhase,
    config: Option<SessionConfig>,
    epoch: u64,
}

impl SessionMachine {
    /// Create a machine in idle phase with no configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Configuration of the running session, if any
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Ticket for the current phase entry
    pub fn ticket(&self) -> PhaseTicket {
        PhaseTicket {
            phase: self.phase,
            epoch: self.epoch,
        }
    }

    /// Whether `ticket` still names the current phase entry
    pub fn is_current(&self, ticket: PhaseTicket) -> bool {
        self.ticket() == ticket
    }

    /// Begin a session with `config`. Legal from idle or complete.
    pub fn start(&mut self, config: SessionConfig) -> Result<PhaseTicket, InvalidPhaseTransition> {
        if self.phase.is_driven() {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "start a session".to_string(),
            });
        }
        let phase = first_phase(&config);
        self.config = Some(config);
        Ok(self.enter(phase))
    }

    /// Move past the phase named by `ticket`.
    ///
    /// Returns the new phase, or `None` when the ticket is stale or the
    /// current phase is not driven.
    pub fn advance(&mut self, ticket: PhaseTicket) -> Option<SessionPhase> {
        if !self.is_current(ticket) || !self.phase.is_driven() {
            return None;
        }
        let config = self.config.as_ref()?;
        let next = next_phase(self.phase, config);
        self.enter(next);
        Some(next)
    }

    /// Abandon the session: discard the configuration and return to idle.
    /// Returns the phase that was active.
    pub fn stop(&mut self) -> SessionPhase {
        let previous = self.phase;
        self.config = None;
        self.enter(SessionPhase::Idle);
        previous
    }

    /// Transition from COMPLETE to IDLE so a new session can be configured
    pub fn reset(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != SessionPhase::Complete {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "start a new session".to_string(),
            });
        }
        self.config = None;
        self.enter(SessionPhase::Idle);
        Ok(())
    }

    fn enter(&mut self, phase: SessionPhase) -> PhaseTicket {
        self.phase = phase;
        self.epoch = self.epoch.wrapping_add(1);
        self.ticket()
    }
}
