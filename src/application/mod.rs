//! Application layer - Use cases and port interfaces
//!
//! Contains the session orchestrator, the playback controller, the
//! meditation countdown and trait definitions for external system
//! interactions.

pub mod countdown;
pub mod playback;
pub mod ports;
pub mod session;
pub mod wake;

// Re-export use cases
pub use countdown::{Countdown, CountdownCancelled, CountdownCompletion};
pub use playback::{AudioProgress, PlayOptions, PlaybackCompletion, PlaybackController, TICK};
pub use session::{
    PhaseOutcome, SessionCommand, SessionError, SessionOptions, SessionOrchestrator,
};
pub use wake::{BecameVisible, WakeLockCoordinator};
