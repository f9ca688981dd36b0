//! Cabinet backplane bus protocol
//!
//! The backplane is a synchronous, addressed, half-duplex serial bus. The
//! controller is always master. Every register access is one transfer:
//!
//! ```text
//!  EN  ‾‾\______________________________________________________/‾‾
//!  CLK ‾‾\_/‾\_/‾\_ ... _/‾\_/‾ ack _/‾\_/‾\_ ... _/‾\_/‾‾‾‾‾‾‾‾‾‾‾
//!        │ A7  A6   ...   A0  │    │ D7  D6   ...   D0 │
//!        └── address phase ───┘    └──── data phase ───┘
//! ```
//!
//! - Address phase: 8 bits, MSB first
//! - Ack: DataIn sampled once after the address phase, low = present
//! - Data phase: 8 bits out and 8 bits in, MSB first, one pair per clock
//!
//! The ack is advisory. A missing ack never aborts a transfer; the data
//! phase always runs and the flag is handed back to the caller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod engine;
pub mod transport;
pub mod view;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use address::{BusAddress, Direction, Readable, Register, RegisterId, SegmentCell, Writable};
pub use engine::{AddressMode, BusMaster, DataPolarity, ProtocolRevision, Reading, Transfer};
pub use transport::BitTransport;
pub use view::{ButtonsView, NeonView, RegisterView, SliderView, SpotlightsView};
