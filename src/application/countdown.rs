//! Meditation countdown
//!
//! One-second resolution timer that runs independently of audio. Remaining
//! seconds are published on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const SECOND: Duration = Duration::from_secs(1);

/// The countdown was stopped or restarted before reaching zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Countdown was cancelled")]
pub struct CountdownCancelled;

/// Resolves once when the countdown reaches zero
#[derive(Debug)]
pub struct CountdownCompletion {
    rx: oneshot::Receiver<()>,
}

impl CountdownCompletion {
    pub async fn wait(self) -> Result<(), CountdownCancelled> {
        self.rx.await.map_err(|_| CountdownCancelled)
    }
}

/// Silent meditation timer
pub struct Countdown {
    remaining: Arc<watch::Sender<u64>>,
    active: Option<(CancellationToken, JoinHandle<()>)>,
}

impl Countdown {
    pub fn new() -> Self {
        let (remaining, _) = watch::channel(0);
        Self {
            remaining: Arc::new(remaining),
            active: None,
        }
    }

    /// Subscribe to remaining seconds
    pub fn remaining(&self) -> watch::Receiver<u64> {
        self.remaining.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|(_, task)| !task.is_finished())
    }

    /// Count down `minutes` minutes, cancelling any run in progress
    pub fn start(&mut self, minutes: u32) -> CountdownCompletion {
        self.start_secs(u64::from(minutes) * 60)
    }

    /// Count down `seconds` seconds, cancelling any run in progress
    pub fn start_secs(&mut self, seconds: u64) -> CountdownCompletion {
        self.stop();
        self.remaining.send_replace(seconds);

        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(tick_down(
            seconds,
            Arc::clone(&self.remaining),
            cancel.clone(),
            tx,
        ));
        self.active = Some((cancel, task));
        CountdownCompletion { rx }
    }

    /// Cancel ticking and reset to zero without firing completion.
    /// Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some((cancel, task)) = self.active.take() {
            cancel.cancel();
            task.abort();
        }
        self.remaining.send_replace(0);
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_down(
    seconds: u64,
    remaining: Arc<watch::Sender<u64>>,
    cancel: CancellationToken,
    done: oneshot::Sender<()>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + SECOND, SECOND);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut left = seconds;

    while left > 0 {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }
        left -= 1;
        remaining.send_replace(left);
    }

    // Fire on a later turn than the update that reached zero
    tokio::task::yield_now().await;
    if cancel.is_cancelled() {
        return;
    }
    let _ = done.send(());
}
