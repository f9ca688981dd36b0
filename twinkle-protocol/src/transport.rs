//! Bit-level transport
//!
//! Every clocked bit uses the same waveform:
//!
//! ```text
//! CLK  ‾‾\______/‾‾‾‾‾‾‾‾‾
//! DO   ===X=============== set while the clock is low
//! DI   ----------^-------- sampled right after the rising edge
//!             │ t │   t │
//! ```
//!
//! `t` is the configured bit delay. The device latches DataOut and drives
//! DataIn on the rising edge.

use embedded_hal::delay::DelayNs;
use twinkle_hal::BusLines;

/// Default per-bit setup/hold delay in microseconds
pub const DEFAULT_BIT_DELAY_US: u32 = 1;

/// Clocks bits in and out over [`BusLines`]
pub struct BitTransport<L, D> {
    lines: L,
    delay: D,
    bit_delay_us: u32,
}

impl<L: BusLines, D: DelayNs> BitTransport<L, D> {
    /// Create a transport and park the lines idle (clock high, deselected)
    pub fn new(mut lines: L, delay: D, bit_delay_us: u32) -> Self {
        lines.set_clock(true);
        lines.set_enable(true);
        Self {
            lines,
            delay,
            bit_delay_us,
        }
    }

    pub fn bit_delay_us(&self) -> u32 {
        self.bit_delay_us
    }

    /// Select the device (enable low) and drop the clock
    pub fn select(&mut self) {
        self.lines.set_enable(false);
        self.lines.set_clock(false);
    }

    /// Return the bus to idle and hold it there for one bit time
    pub fn deselect(&mut self) {
        self.lines.set_clock(true);
        self.lines.set_enable(true);
        self.delay.delay_us(self.bit_delay_us);
    }

    /// Clock one bit out
    pub fn write_bit(&mut self, bit: bool) {
        self.lines.set_clock(false);
        self.lines.set_data(bit);
        self.delay.delay_us(self.bit_delay_us);
        self.lines.set_clock(true);
        self.delay.delay_us(self.bit_delay_us);
    }

    /// Clock one bit out and the device's bit in during the same cycle
    pub fn exchange_bit(&mut self, bit: bool) -> bool {
        self.lines.set_clock(false);
        self.lines.set_data(bit);
        self.delay.delay_us(self.bit_delay_us);
        self.lines.set_clock(true);
        let received = self.lines.read_input();
        self.delay.delay_us(self.bit_delay_us);
        received
    }

    /// Clock one bit in with DataOut held high
    pub fn read_bit(&mut self) -> bool {
        self.exchange_bit(true)
    }

    /// Sample DataIn without clocking
    pub fn sample(&mut self) -> bool {
        self.lines.read_input()
    }

    /// Give back the lines and delay
    pub fn release(self) -> (L, D) {
        (self.lines, self.delay)
    }

    pub fn lines(&self) -> &L {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Clock(bool),
        Data(bool),
        Read,
        Enable(bool),
    }

    /// Records every line operation
    struct Recorder {
        ops: Vec<Op, 64>,
        input: bool,
    }

    impl Recorder {
        fn new(input: bool) -> Self {
            Self {
                ops: Vec::new(),
                input,
            }
        }
    }

    impl BusLines for Recorder {
        fn set_clock(&mut self, high: bool) {
            let _ = self.ops.push(Op::Clock(high));
        }

        fn set_data(&mut self, high: bool) {
            let _ = self.ops.push(Op::Data(high));
        }

        fn read_input(&mut self) -> bool {
            let _ = self.ops.push(Op::Read);
            self.input
        }

        fn set_enable(&mut self, high: bool) {
            let _ = self.ops.push(Op::Enable(high));
        }
    }

    /// Counts requested delay
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn transport(input: bool) -> BitTransport<Recorder, CountingDelay> {
        let mut t = BitTransport::new(Recorder::new(input), CountingDelay::default(), 3);
        t.lines_mut().ops.clear();
        t
    }

    #[test]
    fn test_new_parks_idle() {
        let t = BitTransport::new(Recorder::new(false), CountingDelay::default(), 1);
        assert_eq!(&t.lines().ops[..], &[Op::Clock(true), Op::Enable(true)]);
    }

    #[test]
    fn test_write_bit_waveform() {
        let mut t = transport(false);
        t.write_bit(true);

        assert_eq!(
            &t.lines().ops[..],
            &[Op::Clock(false), Op::Data(true), Op::Clock(true)]
        );
        let (_, delay) = t.release();
        assert_eq!(delay.total_ns, 2 * 3_000);
    }

    #[test]
    fn test_exchange_samples_after_rising_edge() {
        let mut t = transport(true);
        assert!(t.exchange_bit(false));

        assert_eq!(
            &t.lines().ops[..],
            &[Op::Clock(false), Op::Data(false), Op::Clock(true), Op::Read]
        );
    }

    #[test]
    fn test_read_bit_holds_data_high() {
        let mut t = transport(false);
        assert!(!t.read_bit());
        assert_eq!(t.lines().ops[1], Op::Data(true));
    }

    #[test]
    fn test_sample_does_not_clock() {
        let mut t = transport(true);
        assert!(t.sample());
        assert_eq!(&t.lines().ops[..], &[Op::Read]);
    }

    #[test]
    fn test_select_deselect() {
        let mut t = transport(false);
        t.select();
        t.deselect();

        assert_eq!(
            &t.lines().ops[..],
            &[
                Op::Enable(false),
                Op::Clock(false),
                Op::Clock(true),
                Op::Enable(true)
            ]
        );
    }
}
