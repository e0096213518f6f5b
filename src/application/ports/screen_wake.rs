//! Screen wake port
//!
//! Keeps the display and machine awake while a session runs.

use async_trait::async_trait;
use thiserror::Error;

/// Screen wake errors
#[derive(Debug, Clone, Error)]
pub enum WakeError {
    #[error("Screen wake is not supported here: {0}")]
    Unsupported(String),

    #[error("Failed to acquire screen wake: {0}")]
    AcquireFailed(String),

    #[error("Failed to release screen wake: {0}")]
    ReleaseFailed(String),
}

/// Port for a screen wake lock
#[async_trait]
pub trait ScreenWake: Send + Sync {
    /// Request the wake lock. Requesting while held is a no-op.
    async fn acquire(&self) -> Result<(), WakeError>;

    /// Release the wake lock. Releasing while not held is a no-op.
    async fn release(&self) -> Result<(), WakeError>;

    /// Whether the lock is currently held
    fn is_held(&self) -> bool;
}

/// Blanket implementation for boxed screen wake types
#[async_trait]
impl ScreenWake for Box<dyn ScreenWake> {
    async fn acquire(&self) -> Result<(), WakeError> {
        self.as_ref().acquire().await
    }

    async fn release(&self) -> Result<(), WakeError> {
        self.as_ref().release().await
    }

    fn is_held(&self) -> bool {
        self.as_ref().is_held()
    }
}
