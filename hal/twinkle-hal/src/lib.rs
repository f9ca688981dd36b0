//! Twinkle Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the bus engine needs from
//! the host board. Chip-specific HALs implement the pin and clock traits;
//! everything above them (transport, protocol, schedulers) is written
//! against these traits only and can run against a simulated backplane.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  twinkle-core / twinkle-firmware        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twinkle-protocol (transport, engine)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twinkle-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twinkle-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`bus::BusLines`] - The four backplane lines as one capability
//! - [`time::Monotonic`] - Millisecond time source for the schedulers

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod time;

pub use bus::{BusLines, PinBus};
pub use gpio::{InputPin, OutputPin};
pub use time::Monotonic;
