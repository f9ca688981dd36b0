//! Cabinet context and tick function
//!
//! [`Cabinet`] owns everything the poll loop touches: the bus master, the
//! input snapshot and both schedulers. The loop calls [`Cabinet::tick`]
//! with the current time; nothing else mutates this state.

use embedded_hal::delay::DelayNs;
use twinkle_hal::{BusLines, Monotonic};
use twinkle_protocol::address::reg;
use twinkle_protocol::{
    BusMaster, ButtonsView, NeonView, Readable, SegmentCell, SpotlightsView, Writable,
};

use super::report::{AckMask, TickReport};
use super::snapshot::InputSnapshot;
use crate::config::{ConfigError, DisplayConfig, TwinkleConfig};
use crate::scheduler::{LampChase, TextScroller};

/// Controller state for one cabinet backplane
pub struct Cabinet<L, D> {
    bus: BusMaster<L, D>,
    inputs: InputSnapshot,
    scroller: TextScroller,
    chase: LampChase,
}

impl<L: BusLines, D: DelayNs> Cabinet<L, D> {
    /// Create a cabinet around an existing bus master
    ///
    /// `now_ms` starts both scheduler intervals.
    pub fn new(bus: BusMaster<L, D>, display: &DisplayConfig, now_ms: u32) -> Self {
        Self {
            bus,
            inputs: InputSnapshot::default(),
            scroller: TextScroller::new(
                display.text.clone(),
                display.scroll_interval_ms,
                now_ms,
            ),
            chase: LampChase::new(display.chase_interval_ms, now_ms, display.neon),
        }
    }

    /// Build the bus master and cabinet from a full configuration
    pub fn from_config(
        lines: L,
        delay: D,
        config: &TwinkleConfig,
        now_ms: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bus = BusMaster::new(
            lines,
            delay,
            config.timing.bit_delay_us,
            config.timing.revision,
        );
        Ok(Self::new(bus, &config.display, now_ms))
    }

    /// Power-on lamp test: every spotlight and the neon on
    ///
    /// Run once before the first tick; the first tick replaces it with the
    /// chase pattern.
    pub fn lamp_test(&mut self) -> AckMask {
        let mut missed = AckMask::empty();
        self.write(reg::Spotlights, &SpotlightsView::all_on(), &mut missed);
        self.write(reg::Neon, &NeonView { on: true }, &mut missed);
        missed
    }

    /// Run one poll cycle at `now_ms`
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        let mut missed = AckMask::empty();

        self.inputs = InputSnapshot {
            buttons: self.read(reg::Buttons, &mut missed),
            turntable_p1: self.read(reg::TurntableP1, &mut missed),
            turntable_p2: self.read(reg::TurntableP2, &mut missed),
            volume_1_2: self.read(reg::VolumePair12, &mut missed),
            volume_3_4: self.read(reg::VolumePair34, &mut missed),
            volume_5: self.read(reg::Volume5, &mut missed),
        };

        let chased = self.chase.tick(now_ms);
        let spotlights = self.chase.spotlights();
        let neon = self.chase.neon();
        self.write(reg::Spotlights, &spotlights, &mut missed);
        self.write(reg::Neon, &neon, &mut missed);

        let scrolled = self.scroller.tick(now_ms);
        for cell in SegmentCell::ALL {
            let c = self.scroller.cell(cell);
            self.write(cell, &c, &mut missed);
        }

        TickReport {
            missed,
            scrolled,
            chased,
        }
    }

    /// Run one poll cycle at the clock's current time
    pub fn poll<M: Monotonic>(&mut self, clock: &M) -> TickReport {
        self.tick(clock.now_ms())
    }

    /// Write the button lamps; returns the ack flag
    pub fn set_button_lamps(&mut self, lamps: ButtonsView) -> bool {
        self.bus.write(reg::ButtonLamps, &lamps)
    }

    /// Replace the scrolling text
    pub fn set_text(&mut self, text: &str, now_ms: u32) -> Result<(), ConfigError> {
        self.scroller.set_text(text, now_ms)
    }

    pub fn set_neon(&mut self, on: bool) {
        self.chase.set_neon(on);
    }

    /// Inputs as of the last tick
    pub fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn scroller(&self) -> &TextScroller {
        &self.scroller
    }

    pub fn chase(&self) -> &LampChase {
        &self.chase
    }

    pub fn bus(&self) -> &BusMaster<L, D> {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut BusMaster<L, D> {
        &mut self.bus
    }

    fn read<R: Readable>(&mut self, register: R, missed: &mut AckMask) -> R::View {
        let reading = self.bus.read(register);
        missed.record(register.id(), reading.ack);
        reading.value
    }

    fn write<R: Writable>(&mut self, register: R, value: &R::View, missed: &mut AckMask) {
        let ack = self.bus.write(register, value);
        missed.record(register.id(), ack);
    }
}
