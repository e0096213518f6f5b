//! Domain layer - Core business logic
//!
//! Contains value objects, the session state machine, the phase transition
//! policy and domain errors.
//! This layer has no dependencies on external systems.

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

// Re-export common types
pub use catalog::{AudioResource, Bucket, Catalog, ChantEntry, InstructionType, MediaLibrary};
pub use config::AppConfig;
pub use error::*;
pub use session::{SessionConfig, SessionMachine, SessionMode, SessionPhase, SessionRequest};
