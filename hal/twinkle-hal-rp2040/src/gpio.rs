//! Bus pins on embassy-rp GPIO

use embassy_rp::gpio::{Input, Level, Output, Pull};
use twinkle_core::config::{BusPins, PinConfig};
use twinkle_hal::{InputPin, OutputPin, PinBus};

use crate::pins::{PinBank, PinError};

/// Push-pull output driving one bus line
pub struct BusOutput(Output<'static>);

impl BusOutput {
    /// Claim `config.pin` as an output starting at `initial`
    pub fn new(bank: &mut PinBank, config: PinConfig, initial: Level) -> Result<Self, PinError> {
        Ok(Self(Output::new(bank.take(config.pin)?, initial)))
    }
}

impl OutputPin for BusOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Input sampling the backplane data line
pub struct BusInput(Input<'static>);

impl BusInput {
    pub fn new(bank: &mut PinBank, config: PinConfig) -> Result<Self, PinError> {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Ok(Self(Input::new(bank.take(config.pin)?, pull)))
    }
}

impl InputPin for BusInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// The backplane as wired on an RP2040 board
pub type RpBus = PinBus<BusOutput, BusOutput, BusOutput, BusInput>;

/// Claim the four configured pins and park the bus idle
///
/// Clock and enable start high so no device sees a select edge while the
/// remaining pins are set up.
pub fn bus_from_config(bank: &mut PinBank, pins: &BusPins) -> Result<RpBus, PinError> {
    let clock = BusOutput::new(bank, pins.clock, Level::High)?;
    let enable = BusOutput::new(bank, pins.enable, Level::High)?;
    let data_out = BusOutput::new(bank, pins.data_out, Level::Low)?;
    let data_in = BusInput::new(bank, pins.data_in)?;
    Ok(PinBus::new(clock, enable, data_out, data_in))
}
