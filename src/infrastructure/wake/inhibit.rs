//! systemd-inhibit screen wake adapter
//!
//! Holds an idle inhibitor by keeping a `systemd-inhibit` child process
//! alive. Releasing kills the child, which drops the inhibitor.

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::application::ports::{ScreenWake, WakeError};

const INHIBIT_PROGRAM: &str = "systemd-inhibit";
const INHIBIT_ARGS: &[&str] = &[
    "--what=idle",
    "--who=meditation-player",
    "--why=Meditation session in progress",
    "--mode=block",
    "sleep",
    "infinity",
];

/// Screen wake backed by a long-running inhibitor process
pub struct InhibitScreenWake {
    program: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
    held: AtomicBool,
}

impl InhibitScreenWake {
    pub fn new() -> Self {
        Self::with_command(INHIBIT_PROGRAM, INHIBIT_ARGS)
    }

    /// Use a different command to hold the lock
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            child: Mutex::new(None),
            held: AtomicBool::new(false),
        }
    }

    fn spawn(&self) -> Result<Child, WakeError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    WakeError::Unsupported(format!("{} not found", self.program))
                } else {
                    WakeError::AcquireFailed(e.to_string())
                }
            })
    }
}

impl Default for InhibitScreenWake {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenWake for InhibitScreenWake {
    async fn acquire(&self) -> Result<(), WakeError> {
        let mut slot = self.child.lock().await;

        // The inhibitor can be lost while we are not looking
        if let Some(child) = slot.as_mut() {
            match child.try_wait() {
                Ok(None) => return Ok(()),
                Ok(Some(status)) => {
                    tracing::debug!(%status, "inhibitor exited, requesting again");
                }
                Err(e) => {
                    tracing::debug!(error = %e, "inhibitor state unknown, requesting again");
                }
            }
        }

        match self.spawn() {
            Ok(child) => {
                *slot = Some(child);
                self.held.store(true, Ordering::SeqCst);
                tracing::debug!(program = %self.program, "screen wake acquired");
                Ok(())
            }
            Err(e) => {
                *slot = None;
                self.held.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn release(&self) -> Result<(), WakeError> {
        let mut slot = self.child.lock().await;
        self.held.store(false, Ordering::SeqCst);

        let Some(mut child) = slot.take() else {
            return Ok(());
        };

        if let Ok(Some(_)) = child.try_wait() {
            return Ok(());
        }

        child
            .kill()
            .await
            .map_err(|e| WakeError::ReleaseFailed(e.to_string()))?;
        tracing::debug!(program = %self.program, "screen wake released");
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}
