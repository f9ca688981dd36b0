//! Backplane line capability
//!
//! The cabinet backplane is driven through four lines:
//!
//! | Line     | Direction | Notes                     |
//! |----------|-----------|---------------------------|
//! | Clock    | out       | idles high                |
//! | Enable   | out       | active-low device select  |
//! | DataOut  | out       | controller → backplane    |
//! | DataIn   | in        | backplane → controller    |
//!
//! [`BusLines`] exposes them as raw levels. Polarity (active-low enable,
//! ack-is-low) is the transport's business, not the board's.

use crate::gpio::{InputPin, OutputPin};

/// The four backplane lines as a single capability
pub trait BusLines {
    /// Drive the clock line
    fn set_clock(&mut self, high: bool);

    /// Drive the outgoing data line
    fn set_data(&mut self, high: bool);

    /// Sample the incoming data line
    fn read_input(&mut self) -> bool;

    /// Drive the enable line (raw level; the device is selected when low)
    fn set_enable(&mut self, high: bool);
}

/// [`BusLines`] built from four individual pins
pub struct PinBus<CLK, EN, DO, DI> {
    clock: CLK,
    enable: EN,
    data_out: DO,
    data_in: DI,
}

impl<CLK, EN, DO, DI> PinBus<CLK, EN, DO, DI>
where
    CLK: OutputPin,
    EN: OutputPin,
    DO: OutputPin,
    DI: InputPin,
{
    /// Take ownership of the pins and park the bus idle
    ///
    /// Idle is clock high and enable high (no device selected).
    pub fn new(mut clock: CLK, mut enable: EN, data_out: DO, data_in: DI) -> Self {
        clock.set_high();
        enable.set_high();
        Self {
            clock,
            enable,
            data_out,
            data_in,
        }
    }

    /// Give the pins back
    pub fn release(self) -> (CLK, EN, DO, DI) {
        (self.clock, self.enable, self.data_out, self.data_in)
    }
}

impl<CLK, EN, DO, DI> BusLines for PinBus<CLK, EN, DO, DI>
where
    CLK: OutputPin,
    EN: OutputPin,
    DO: OutputPin,
    DI: InputPin,
{
    fn set_clock(&mut self, high: bool) {
        self.clock.set_level(high);
    }

    fn set_data(&mut self, high: bool) {
        self.data_out.set_level(high);
    }

    fn read_input(&mut self) -> bool {
        self.data_in.is_high()
    }

    fn set_enable(&mut self, high: bool) {
        self.enable.set_level(high);
    }
}

impl<T: BusLines + ?Sized> BusLines for &mut T {
    fn set_clock(&mut self, high: bool) {
        (**self).set_clock(high);
    }

    fn set_data(&mut self, high: bool) {
        (**self).set_data(high);
    }

    fn read_input(&mut self) -> bool {
        (**self).read_input()
    }

    fn set_enable(&mut self, high: bool) {
        (**self).set_enable(high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock output pin that remembers its level
    struct MockOut {
        high: bool,
    }

    impl OutputPin for MockOut {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }
    }

    /// Mock input pin with a fixed level
    struct MockIn {
        high: bool,
    }

    impl InputPin for MockIn {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    fn make_bus(input: bool) -> PinBus<MockOut, MockOut, MockOut, MockIn> {
        PinBus::new(
            MockOut { high: false },
            MockOut { high: false },
            MockOut { high: false },
            MockIn { high: input },
        )
    }

    #[test]
    fn test_new_parks_bus_idle() {
        let bus = make_bus(false);
        let (clock, enable, data_out, _) = bus.release();

        assert!(clock.high);
        assert!(enable.high);
        assert!(!data_out.high);
    }

    #[test]
    fn test_lines_drive_pins() {
        let mut bus = make_bus(true);

        bus.set_clock(false);
        bus.set_enable(false);
        bus.set_data(true);
        assert!(bus.read_input());

        let (clock, enable, data_out, _) = bus.release();
        assert!(!clock.high);
        assert!(!enable.high);
        assert!(data_out.high);
    }

    #[test]
    fn test_input_low() {
        let mut bus = make_bus(false);
        assert!(!bus.read_input());
    }
}
