//! Signal handlers for a running session

use nix::sys::signal::Signal;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::application::BecameVisible;

use super::controls::Control;

/// Start listening for OS signals.
///
/// SIGINT and SIGTERM stop the session. SIGCONT, sent when the process
/// resumes after being suspended, counts as becoming visible again.
pub fn install(
    controls: mpsc::Sender<Control>,
    visibility: mpsc::Sender<BecameVisible>,
) -> Result<(), std::io::Error> {
    for kind in [SignalKind::interrupt(), SignalKind::terminate()] {
        let mut stream = signal(kind)?;
        let tx = controls.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                tracing::debug!(signal = ?kind, "stop requested by signal");
                if tx.send(Control::Stop).await.is_err() {
                    break;
                }
            }
        });
    }

    let mut sigcont = signal(SignalKind::from_raw(Signal::SIGCONT as i32))?;
    tokio::spawn(async move {
        while sigcont.recv().await.is_some() {
            if visibility.send(BecameVisible).await.is_err() {
                break;
            }
        }
    });

    Ok(())
}
