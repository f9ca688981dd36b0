//! RP2040 bindings for the Twinkle cabinet bus
//!
//! Implements the `twinkle-hal` traits on top of embassy-rp:
//! - GPIO pins taken by number from the config
//! - Bus pin wrappers with the right idle levels and pulls
//! - Millisecond clock from the embassy time driver

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;
pub mod time;

pub use gpio::{bus_from_config, BusInput, BusOutput, RpBus};
pub use pins::{PinBank, PinError};
pub use time::EmbassyClock;
