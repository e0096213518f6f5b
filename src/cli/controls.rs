//! Keyboard controls read from stdin
//!
//! Each input line is one control. Reading happens on a plain thread since
//! a blocking stdin read would otherwise hold up runtime shutdown.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;

use crate::application::SessionCommand;

/// A user control, from the keyboard or a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Skip,
    Stop,
    NewSession,
    /// Stdin reached end of file
    InputClosed,
}

impl Control {
    /// Parse one input line; unknown input yields `None`
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "s" | "skip" => Some(Self::Skip),
            "q" | "quit" | "stop" => Some(Self::Stop),
            "n" | "new" => Some(Self::NewSession),
            _ => None,
        }
    }

    /// The session command this control maps to while a session runs
    pub fn command(self) -> Option<SessionCommand> {
        match self {
            Self::Skip => Some(SessionCommand::Skip),
            Self::Stop => Some(SessionCommand::Stop),
            Self::NewSession | Self::InputClosed => None,
        }
    }
}

/// Forward controls typed on stdin to `tx` until stdin closes
pub fn spawn_stdin_reader(tx: mpsc::Sender<Control>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-controls".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match Control::parse(&line) {
                    Some(control) => {
                        if tx.blocking_send(control).is_err() {
                            return;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => tracing::debug!(input = %line, "ignoring unknown control"),
                }
            }
            let _ = tx.blocking_send(Control::InputClosed);
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(Control::parse("s"), Some(Control::Skip));
        assert_eq!(Control::parse("  Skip \n"), Some(Control::Skip));
        assert_eq!(Control::parse("q"), Some(Control::Stop));
        assert_eq!(Control::parse("stop"), Some(Control::Stop));
        assert_eq!(Control::parse("N"), Some(Control::NewSession));
    }

    #[test]
    fn unknown_input_is_ignored() {
        assert_eq!(Control::parse(""), None);
        assert_eq!(Control::parse("pause"), None);
    }

    #[test]
    fn only_skip_and_stop_reach_the_session() {
        assert_eq!(Control::Skip.command(), Some(SessionCommand::Skip));
        assert_eq!(Control::Stop.command(), Some(SessionCommand::Stop));
        assert_eq!(Control::NewSession.command(), None);
        assert_eq!(Control::InputClosed.command(), None);
    }
}
