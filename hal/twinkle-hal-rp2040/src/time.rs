//! Embassy time driver as a [`Monotonic`] source

use embassy_time::Instant;
use twinkle_hal::Monotonic;

/// Milliseconds since boot, wrapping at `u32::MAX`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
