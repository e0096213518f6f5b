//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, keyboard controls, signal
//! handling, and the session runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod controls;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_session, show_catalog, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, PlayerOptions};
pub use presenter::Presenter;
