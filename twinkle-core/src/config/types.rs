//! Configuration type definitions

use heapless::String;
use twinkle_protocol::ProtocolRevision;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum display text length in characters
pub const MAX_TEXT_LEN: usize = 64;

/// Default text shown on the segment display
pub const DEFAULT_TEXT: &str = "HELLO - WORLD !";

/// Default text scroll interval
pub const DEFAULT_SCROLL_INTERVAL_MS: u32 = 2500;

/// Default lamp chase interval
pub const DEFAULT_CHASE_INTERVAL_MS: u32 = 250;

/// Default per-bit delay
pub const DEFAULT_BIT_DELAY_US: u32 = 1;

/// Display text storage
pub type DisplayText = String<MAX_TEXT_LEN>;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Display text longer than [`MAX_TEXT_LEN`]
    TextTooLong,
    /// Display text contains characters the segment cells cannot show
    NonAsciiText,
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Pin string is not of the form `gpioN` / `^gpioN`
    InvalidPin,
    /// The same GPIO is assigned to two bus lines
    PinConflict,
}

/// GPIO assignment for one bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO number
    pub pin: u8,
    /// Enable internal pull-up (input lines only)
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// Pins for the four backplane lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusPins {
    pub clock: PinConfig,
    /// Active-low device select
    pub enable: PinConfig,
    pub data_out: PinConfig,
    pub data_in: PinConfig,
}

impl Default for BusPins {
    fn default() -> Self {
        Self {
            clock: PinConfig::new(2),
            enable: PinConfig::new(3),
            data_out: PinConfig::new(4),
            data_in: PinConfig::new(5),
        }
    }
}

impl BusPins {
    /// Pins in line order: clock, enable, data-out, data-in
    pub fn all(&self) -> [PinConfig; 4] {
        [self.clock, self.enable, self.data_out, self.data_in]
    }

    /// Reject a GPIO shared between two lines
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.all();
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Err(ConfigError::PinConflict);
            }
        }
        Ok(())
    }
}

/// Wire timing and protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Setup and hold time per clock half (µs)
    pub bit_delay_us: u32,
    pub revision: ProtocolRevision,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            bit_delay_us: DEFAULT_BIT_DELAY_US,
            revision: ProtocolRevision::default(),
        }
    }
}

/// Segment display and lamp animation settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Text scrolled across the nine segment cells
    pub text: DisplayText,
    /// Time between scroll steps (ms)
    pub scroll_interval_ms: u32,
    /// Time between lamp chase steps (ms)
    pub chase_interval_ms: u32,
    /// Neon tube state
    pub neon: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut text = String::new();
        let _ = text.push_str(DEFAULT_TEXT);
        Self {
            text,
            scroll_interval_ms: DEFAULT_SCROLL_INTERVAL_MS,
            chase_interval_ms: DEFAULT_CHASE_INTERVAL_MS,
            neon: true,
        }
    }
}

/// Build display text, rejecting anything the cells cannot hold
pub fn display_text(s: &str) -> Result<DisplayText, ConfigError> {
    if !s.is_ascii() {
        return Err(ConfigError::NonAsciiText);
    }
    let mut text = String::new();
    text.push_str(s).map_err(|_| ConfigError::TextTooLong)?;
    Ok(text)
}

/// Diagnostic output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogConfig {
    /// Log input changes and scroll steps as they happen
    pub verbose: bool,
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwinkleConfig {
    pub pins: BusPins,
    pub timing: BusTiming,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

impl TwinkleConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pins.validate()?;
        if !self.display.text.is_ascii() {
            return Err(ConfigError::NonAsciiText);
        }
        Ok(())
    }
}
