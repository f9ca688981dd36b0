//! Text scroller for the sixteen-segment display
//!
//! The display is a nine-cell window onto the text. The cursor names the
//! first visible character; cells past the end of the text show a blank.
//!
//! ```text
//! text:   H E L L O   -   W O R L D   !
//! cursor:                     ^ 10
//! window:                    [R L D   ! _ _ _ _]
//! ```

use twinkle_hal::time::elapsed_ms;
use twinkle_protocol::SegmentCell;

use crate::config::{display_text, ConfigError, DisplayText};

/// Number of visible cells
pub const WINDOW: usize = SegmentCell::COUNT;

/// Character written to cells past the end of the text
pub const BLANK: u8 = b' ';

/// Scroll state for the segment display
#[derive(Debug, Clone)]
pub struct TextScroller {
    text: DisplayText,
    /// Index of the first visible character, always `< text.len()`
    cursor: usize,
    interval_ms: u32,
    last_advance_ms: u32,
}

impl TextScroller {
    /// Create a scroller starting at the first character
    ///
    /// `now_ms` starts the first interval.
    pub fn new(text: DisplayText, interval_ms: u32, now_ms: u32) -> Self {
        Self {
            text,
            cursor: 0,
            interval_ms,
            last_advance_ms: now_ms,
        }
    }

    /// Replace the text and restart from its first character
    pub fn set_text(&mut self, text: &str, now_ms: u32) -> Result<(), ConfigError> {
        self.text = display_text(text)?;
        self.cursor = 0;
        self.last_advance_ms = now_ms;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Advance the cursor if the interval has elapsed
    ///
    /// Returns true when the cursor moved. The cursor wraps to 0 after the
    /// last character. Empty text never advances.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if elapsed_ms(now_ms, self.last_advance_ms) < self.interval_ms {
            return false;
        }
        self.last_advance_ms = now_ms;

        if self.text.is_empty() {
            return false;
        }

        self.cursor += 1;
        if self.cursor >= self.text.len() {
            self.cursor = 0;
        }
        true
    }

    /// Character for one cell at the current cursor
    pub fn cell(&self, cell: SegmentCell) -> u8 {
        self.text
            .as_bytes()
            .get(self.cursor + cell.index())
            .copied()
            .unwrap_or(BLANK)
    }

    /// All nine cells at the current cursor, left to right
    pub fn window(&self) -> [u8; WINDOW] {
        let mut window = [BLANK; WINDOW];
        for (slot, cell) in window.iter_mut().zip(SegmentCell::ALL) {
            *slot = self.cell(cell);
        }
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INTERVAL: u32 = 2500;

    fn scroller(text: &str) -> TextScroller {
        TextScroller::new(display_text(text).unwrap(), INTERVAL, 0)
    }

    /// Advance the cursor `steps` times, one interval apart
    fn advance(s: &mut TextScroller, steps: u32) {
        for step in 1..=steps {
            assert!(s.tick(step * INTERVAL));
        }
    }

    #[test]
    fn test_no_advance_before_interval() {
        let mut s = scroller("HELLO - WORLD !");
        assert!(!s.tick(0));
        assert!(!s.tick(INTERVAL - 1));
        assert_eq!(s.cursor(), 0);

        assert!(s.tick(INTERVAL));
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_interval_restarts_on_advance() {
        let mut s = scroller("HELLO");
        assert!(s.tick(INTERVAL + 100));
        assert!(!s.tick(2 * INTERVAL));
        assert!(s.tick(2 * INTERVAL + 100));
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_period_equals_length() {
        let mut s = scroller("HELLO - WORLD !");
        assert_eq!(s.len(), 15);

        advance(&mut s, 14);
        assert_eq!(s.cursor(), 14);

        assert!(s.tick(15 * INTERVAL));
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_window_at_start() {
        let s = scroller("HELLO - WORLD !");
        assert_eq!(&s.window(), b"HELLO - W");
    }

    #[test]
    fn test_window_pads_past_end() {
        let mut s = scroller("HELLO - WORLD !");

        advance(&mut s, 10);
        assert_eq!(s.cursor(), 10);
        let window = s.window();
        assert_eq!(&window[..5], b"RLD !");
        assert!(window[5..].iter().all(|c| *c == BLANK));

        s.tick(11 * INTERVAL);
        s.tick(12 * INTERVAL);
        assert_eq!(s.cursor(), 12);
        assert_eq!(&s.window(), b"D !      ");
    }

    #[test]
    fn test_empty_text() {
        let mut s = scroller("");
        assert!(!s.tick(10 * INTERVAL));
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.window(), [BLANK; WINDOW]);
    }

    #[test]
    fn test_set_text_resets_cursor() {
        let mut s = scroller("HELLO");
        advance(&mut s, 3);

        s.set_text("BYE", 10 * INTERVAL).unwrap();
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.interval_ms(), INTERVAL);
        assert_eq!(&s.window(), b"BYE      ");
        assert!(!s.tick(10 * INTERVAL + 1));
    }

    #[test]
    fn test_set_text_rejects_overlong() {
        let mut s = scroller("HELLO");
        let long = [b'Z'; 65];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(s.set_text(long, 0), Err(ConfigError::TextTooLong));
        assert_eq!(s.text(), "HELLO");
    }

    #[test]
    fn test_survives_clock_wrap() {
        let mut s = TextScroller::new(display_text("AB").unwrap(), 100, u32::MAX - 50);
        assert!(!s.tick(u32::MAX));
        assert!(s.tick(49));
        assert_eq!(s.cursor(), 1);
    }

    proptest! {
        #[test]
        fn prop_cursor_in_bounds(len in 1usize..=64, steps in 0u32..200) {
            let text = [b'x'; 64];
            let text = core::str::from_utf8(&text[..len]).unwrap();
            let mut s = TextScroller::new(display_text(text).unwrap(), 10, 0);
            for step in 1..=steps {
                s.tick(step * 10);
                prop_assert!(s.cursor() < s.len());
            }
            prop_assert_eq!(s.cursor(), steps as usize % len);
        }
    }
}
