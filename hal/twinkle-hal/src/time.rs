//! Monotonic time source
//!
//! The schedulers never sleep. They compare the current time against the
//! last time they advanced, so all they need is a millisecond counter.

/// Free-running millisecond counter
///
/// The value wraps at `u32::MAX`; consumers compare timestamps with
/// `wrapping_sub` so a wrap is indistinguishable from normal progress.
pub trait Monotonic {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u32;
}

impl<T: Monotonic> Monotonic for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of counter wrap
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed_ms(2500, 0), 2500);
        assert_eq!(elapsed_ms(100, 100), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        // 10ms before wrap to 5ms after wrap
        assert_eq!(elapsed_ms(5, u32::MAX - 9), 15);
    }
}
