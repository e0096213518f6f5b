//! Meditation Player - timed and guided meditation sessions
//!
//! This crate sequences a meditation session through its phases: an
//! optional gong, an opening chant, a silent countdown, a closing chant and
//! a closing recording, or a single guided recording. Chants are drawn at
//! random from a catalog manifest of audio files.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Catalog, session phases, transition policy and state machine
//! - **Application**: Session orchestrator, playback controller, countdown,
//!   wake lock coordination, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rodio, catalog sources,
//!   XDG config, systemd-inhibit)
//! - **CLI**: Command-line interface, keyboard controls and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
