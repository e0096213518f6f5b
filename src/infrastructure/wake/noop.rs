//! No-op screen wake adapter
//!
//! Used when the wake lock is disabled or unavailable.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::application::ports::{ScreenWake, WakeError};

/// Screen wake that only remembers whether it was requested
#[derive(Default)]
pub struct NoOpScreenWake {
    held: AtomicBool,
}

impl NoOpScreenWake {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScreenWake for NoOpScreenWake {
    async fn acquire(&self) -> Result<(), WakeError> {
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeError> {
        self.held.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}
