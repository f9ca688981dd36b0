//! Timed update schedulers
//!
//! Both schedulers are polled once per tick with the current time and
//! advance only when their interval has elapsed. Neither ever sleeps.

pub mod chase;
pub mod scroll;

pub use chase::LampChase;
pub use scroll::{TextScroller, BLANK, WINDOW};
