//! Session domain - phases, configuration, transition policy and state machine

mod config;
mod machine;
mod phase;
mod policy;

pub use config::{
    ChantSlot, SessionConfig, SessionMode, SessionRequest, StartRefused, MEDITATION_MINUTES,
};
pub use machine::{InvalidPhaseTransition, PhaseTicket, SessionMachine};
pub use phase::SessionPhase;
pub use policy::{audio_for, first_phase, next_phase};
