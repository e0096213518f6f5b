//! Screen wake infrastructure adapters

mod inhibit;
mod noop;

pub use inhibit::InhibitScreenWake;
pub use noop::NoOpScreenWake;

use crate::application::ports::ScreenWake;

/// Create a screen wake adapter based on whether the wake lock is enabled
pub fn create_screen_wake(enabled: bool) -> Box<dyn ScreenWake> {
    if enabled {
        Box::new(InhibitScreenWake::new())
    } else {
        Box::new(NoOpScreenWake::new())
    }
}
