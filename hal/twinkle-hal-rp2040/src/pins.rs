//! GPIO lookup by number
//!
//! The bus pins come from `twinkle.toml`, so they are claimed at runtime
//! by GPIO number instead of by peripheral field.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};

/// GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// GPIO number out of range (0-29 valid)
    InvalidPin,
    /// Pin was already claimed
    AlreadyTaken,
}

/// Index into the bank for a GPIO number
pub fn pin_index(pin: u8) -> Result<usize, PinError> {
    let index = pin as usize;
    if index < GPIO_COUNT {
        Ok(index)
    } else {
        Err(PinError::InvalidPin)
    }
}

macro_rules! bank {
    ($p:ident; $($pin:ident),* $(,)?) => {
        [$(Some(Peri::<'static, AnyPin>::from($p.$pin))),*]
    };
}

/// Every GPIO pin, each claimable once
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Move all GPIO pins out of the peripherals
    ///
    /// The bus needs nothing but GPIO, so the rest of `p` is dropped.
    pub fn new(p: Peripherals) -> Self {
        Self {
            pins: bank!(p;
                PIN_0, PIN_1, PIN_2, PIN_3, PIN_4, PIN_5, PIN_6, PIN_7, PIN_8, PIN_9,
                PIN_10, PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19,
                PIN_20, PIN_21, PIN_22, PIN_23, PIN_24, PIN_25, PIN_26, PIN_27, PIN_28, PIN_29,
            ),
        }
    }

    /// Claim a pin by GPIO number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins[pin_index(pin)?]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}
