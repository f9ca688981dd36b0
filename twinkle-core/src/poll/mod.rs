//! Poll cycle coordination
//!
//! One tick reads every input register, then writes every output
//! register from the current animation and text state:
//!
//! ```text
//! Buttons → TurntableP1 → TurntableP2 → Vol 1/2 → Vol 3/4 → Vol 5
//!   → Spotlights → Neon → 16seg 1 … 16seg 9
//! ```
//!
//! Outputs are written every tick whether or not anything changed, so a
//! byte corrupted on the wire is corrected on the next tick.

pub mod cabinet;
pub mod report;
pub mod snapshot;

pub use cabinet::Cabinet;
pub use report::{AckMask, TickReport};
pub use snapshot::InputSnapshot;
