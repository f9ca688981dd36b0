//! Spotlight chase animation
//!
//! One lamp lit at a time, stepping 0 → 1 → … → 7 → 0. The neon tube is
//! part of the same animation state and is written alongside it.

use twinkle_hal::time::elapsed_ms;
use twinkle_protocol::{NeonView, SpotlightsView};

/// Number of chase positions
pub const CHASE_STEPS: u8 = SpotlightsView::LAMP_COUNT as u8;

/// Lamp chase state
#[derive(Debug, Clone)]
pub struct LampChase {
    /// Active lamp (0-7)
    index: u8,
    interval_ms: u32,
    last_change_ms: u32,
    neon: bool,
}

impl LampChase {
    /// Start the chase on lamp 0
    pub fn new(interval_ms: u32, now_ms: u32, neon: bool) -> Self {
        Self {
            index: 0,
            interval_ms,
            last_change_ms: now_ms,
            neon,
        }
    }

    /// Step to the next lamp once more than one interval has passed
    ///
    /// Returns true when the index moved.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if elapsed_ms(now_ms, self.last_change_ms) <= self.interval_ms {
            return false;
        }
        self.last_change_ms = now_ms;
        self.index = (self.index + 1) % CHASE_STEPS;
        true
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn set_neon(&mut self, on: bool) {
        self.neon = on;
    }

    /// Spotlight byte for the current step: only the active lamp lit
    pub fn spotlights(&self) -> SpotlightsView {
        SpotlightsView::single(self.index as usize)
    }

    pub fn neon(&self) -> NeonView {
        NeonView { on: self.neon }
    }
}
