//! Screen wake coordination
//!
//! Follows session phase changes and environment visibility, and holds the
//! screen wake lock while a session is being driven.

use tokio::sync::{mpsc, watch};

use crate::domain::session::SessionPhase;

use super::ports::{ScreenWake, WakeError};

/// The environment reports the player visible again after having been
/// hidden or suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BecameVisible;

/// Acquires the wake lock on leaving idle and releases it on complete or idle
pub struct WakeLockCoordinator<W: ScreenWake> {
    wake: W,
}

impl<W: ScreenWake> WakeLockCoordinator<W> {
    pub fn new(wake: W) -> Self {
        Self { wake }
    }

    /// React to the session entering `phase`
    pub async fn on_phase(&self, phase: SessionPhase) {
        let result = if phase.is_driven() {
            if self.wake.is_held() {
                return;
            }
            self.wake.acquire().await
        } else {
            if !self.wake.is_held() {
                return;
            }
            self.wake.release().await
        };
        match result {
            Ok(()) => {}
            Err(e @ WakeError::Unsupported(_)) => {
                tracing::info!(phase = %phase, error = %e, "screen wake unavailable");
            }
            Err(e) => tracing::warn!(phase = %phase, error = %e, "screen wake update failed"),
        }
    }

    /// React to becoming visible again while the session is in `phase`.
    ///
    /// Some environments drop the lock while hidden, so it is requested again.
    pub async fn on_visible(&self, phase: SessionPhase) {
        if !phase.is_driven() {
            return;
        }
        if let Err(e) = self.wake.acquire().await {
            tracing::warn!(phase = %phase, error = %e, "screen wake re-request failed");
        }
    }

    /// Follow `phases` and `visibility` until the phase channel closes,
    /// then release the lock.
    pub async fn run(
        self,
        mut phases: watch::Receiver<SessionPhase>,
        mut visibility: mpsc::Receiver<BecameVisible>,
    ) {
        let current = *phases.borrow_and_update();
        self.on_phase(current).await;

        loop {
            tokio::select! {
                changed = phases.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let phase = *phases.borrow_and_update();
                    self.on_phase(phase).await;
                }
                Some(BecameVisible) = visibility.recv() => {
                    let phase = *phases.borrow();
                    self.on_visible(phase).await;
                }
            }
        }

        if self.wake.is_held() {
            if let Err(e) = self.wake.release().await {
                tracing::warn!(error = %e, "screen wake release failed");
            }
        }
    }
}
