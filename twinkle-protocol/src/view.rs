//! Typed views of register bytes
//!
//! Every register byte has a fixed meaning depending on which register it
//! came from or goes to. The views below name those bits. Unused filler
//! bits are not stored: decoding drops them and encoding writes them as 0.

/// A register byte reinterpreted as named fields
pub trait RegisterView: Sized {
    /// Decode a raw register byte
    fn from_raw(raw: u8) -> Self;

    /// Encode into the raw register byte
    fn to_raw(&self) -> u8;
}

/// Plain byte (turntable position, segment character)
impl RegisterView for u8 {
    fn from_raw(raw: u8) -> Self {
        raw
    }

    fn to_raw(&self) -> u8 {
        *self
    }
}

/// Two 4-bit volume sliders sharing one register
///
/// `first` lives in the low nibble, `second` in the high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderView {
    first: u8,
    second: u8,
}

impl SliderView {
    /// Build a slider pair; values are truncated to 4 bits
    pub const fn new(first: u8, second: u8) -> Self {
        Self {
            first: first & 0x0F,
            second: second & 0x0F,
        }
    }

    /// Low-nibble slider (0-15)
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// High-nibble slider (0-15)
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl RegisterView for SliderView {
    fn from_raw(raw: u8) -> Self {
        Self::new(raw, raw >> 4)
    }

    fn to_raw(&self) -> u8 {
        (self.second << 4) | self.first
    }
}

/// Effector and system buttons
///
/// Bits 5-7 are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonsView {
    pub p1_start: bool,
    pub p2_start: bool,
    pub vefx: bool,
    pub effect: bool,
    pub credit_counter: bool,
}

impl ButtonsView {
    const P1_START: u8 = 1 << 0;
    const P2_START: u8 = 1 << 1;
    const VEFX: u8 = 1 << 2;
    const EFFECT: u8 = 1 << 3;
    const CREDIT_COUNTER: u8 = 1 << 4;

    /// Mask of the bits this view carries
    pub const USED_BITS: u8 = 0x1F;
}

impl RegisterView for ButtonsView {
    fn from_raw(raw: u8) -> Self {
        Self {
            p1_start: raw & Self::P1_START != 0,
            p2_start: raw & Self::P2_START != 0,
            vefx: raw & Self::VEFX != 0,
            effect: raw & Self::EFFECT != 0,
            credit_counter: raw & Self::CREDIT_COUNTER != 0,
        }
    }

    fn to_raw(&self) -> u8 {
        let mut raw = 0;
        if self.p1_start {
            raw |= Self::P1_START;
        }
        if self.p2_start {
            raw |= Self::P2_START;
        }
        if self.vefx {
            raw |= Self::VEFX;
        }
        if self.effect {
            raw |= Self::EFFECT;
        }
        if self.credit_counter {
            raw |= Self::CREDIT_COUNTER;
        }
        raw
    }
}

/// Wire bit for each lamp, indexed by lamp number
///
/// The backplane shifts the byte MSB first and the lamps are wired in the
/// order 3, 2, 1, 0, 4, 5, 6, 7. This table is a property of the hardware.
const LAMP_BITS: [u8; SpotlightsView::LAMP_COUNT] = [
    0x10, // lamp0
    0x20, // lamp1
    0x40, // lamp2
    0x80, // lamp3
    0x08, // lamp4
    0x04, // lamp5
    0x02, // lamp6
    0x01, // lamp7
];

/// Eight spotlight lamps, addressed by physical lamp number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpotlightsView {
    lamps: [bool; Self::LAMP_COUNT],
}

impl SpotlightsView {
    /// Number of spotlight lamps
    pub const LAMP_COUNT: usize = 8;

    /// All lamps off
    pub const fn off() -> Self {
        Self {
            lamps: [false; Self::LAMP_COUNT],
        }
    }

    /// All lamps on
    pub const fn all_on() -> Self {
        Self {
            lamps: [true; Self::LAMP_COUNT],
        }
    }

    /// Only `lamp` lit; out-of-range lamp numbers light nothing
    pub fn single(lamp: usize) -> Self {
        let mut view = Self::off();
        view.set(lamp, true);
        view
    }

    /// State of one lamp (false for out-of-range numbers)
    pub fn is_on(&self, lamp: usize) -> bool {
        self.lamps.get(lamp).copied().unwrap_or(false)
    }

    /// Switch one lamp; out-of-range numbers are ignored
    pub fn set(&mut self, lamp: usize, on: bool) {
        if let Some(slot) = self.lamps.get_mut(lamp) {
            *slot = on;
        }
    }

    /// Number of lamps currently lit
    pub fn lit_count(&self) -> usize {
        self.lamps.iter().filter(|on| **on).count()
    }

    /// Wire bit of a lamp
    pub fn wire_bit(lamp: usize) -> Option<u8> {
        LAMP_BITS.get(lamp).copied()
    }
}

impl RegisterView for SpotlightsView {
    fn from_raw(raw: u8) -> Self {
        let mut view = Self::off();
        for (lamp, bit) in LAMP_BITS.iter().enumerate() {
            view.lamps[lamp] = raw & bit != 0;
        }
        view
    }

    fn to_raw(&self) -> u8 {
        LAMP_BITS
            .iter()
            .zip(self.lamps.iter())
            .filter(|(_, on)| **on)
            .fold(0, |raw, (bit, _)| raw | bit)
    }
}

/// Neon tube: one "on" bit, bits 1-7 unused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NeonView {
    pub on: bool,
}

impl RegisterView for NeonView {
    fn from_raw(raw: u8) -> Self {
        Self { on: raw & 0x01 != 0 }
    }

    fn to_raw(&self) -> u8 {
        self.on as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spotlight_wire_order() {
        let expected = [0x10, 0x20, 0x40, 0x80, 0x08, 0x04, 0x02, 0x01];
        for (lamp, bit) in expected.iter().enumerate() {
            assert_eq!(SpotlightsView::single(lamp).to_raw(), *bit, "lamp{}", lamp);
        }
    }

    #[test]
    fn test_spotlight_lamp3_is_msb() {
        let mut view = SpotlightsView::off();
        view.set(3, true);
        assert_eq!(view.to_raw(), 0b1000_0000);
    }

    #[test]
    fn test_spotlight_all_on() {
        assert_eq!(SpotlightsView::all_on().to_raw(), 0xFF);
        assert_eq!(SpotlightsView::off().to_raw(), 0x00);
    }

    #[test]
    fn test_spotlight_out_of_range_ignored() {
        let mut view = SpotlightsView::off();
        view.set(8, true);
        assert_eq!(view, SpotlightsView::off());
        assert!(!view.is_on(8));
        assert_eq!(SpotlightsView::wire_bit(8), None);
    }

    #[test]
    fn test_slider_nibbles() {
        let view = SliderView::from_raw(0xA3);
        assert_eq!(view.first(), 0x3);
        assert_eq!(view.second(), 0xA);
        assert_eq!(SliderView::new(0x1F, 0x2E).to_raw(), 0xEF);
    }

    #[test]
    fn test_buttons_bits() {
        let view = ButtonsView::from_raw(0b0001_0101);
        assert!(view.p1_start);
        assert!(!view.p2_start);
        assert!(view.vefx);
        assert!(!view.effect);
        assert!(view.credit_counter);
    }

    #[test]
    fn test_neon_ignores_filler() {
        assert!(NeonView::from_raw(0xFF).on);
        assert!(!NeonView::from_raw(0xFE).on);
        assert_eq!(NeonView { on: true }.to_raw(), 0x01);
    }

    fn buttons() -> impl Strategy<Value = ButtonsView> {
        any::<[bool; 5]>().prop_map(|b| ButtonsView {
            p1_start: b[0],
            p2_start: b[1],
            vefx: b[2],
            effect: b[3],
            credit_counter: b[4],
        })
    }

    proptest! {
        #[test]
        fn prop_slider_view_roundtrip(first in 0u8..16, second in 0u8..16) {
            let view = SliderView::new(first, second);
            prop_assert_eq!(SliderView::from_raw(view.to_raw()), view);
        }

        #[test]
        fn prop_slider_raw_bijective(raw in any::<u8>()) {
            prop_assert_eq!(SliderView::from_raw(raw).to_raw(), raw);
        }

        #[test]
        fn prop_buttons_view_roundtrip(view in buttons()) {
            prop_assert_eq!(ButtonsView::from_raw(view.to_raw()), view);
        }

        #[test]
        fn prop_buttons_raw_drops_filler(raw in any::<u8>()) {
            prop_assert_eq!(ButtonsView::from_raw(raw).to_raw(), raw & ButtonsView::USED_BITS);
        }

        #[test]
        fn prop_spotlights_raw_bijective(raw in any::<u8>()) {
            let view = SpotlightsView::from_raw(raw);
            prop_assert_eq!(view.to_raw(), raw);
            prop_assert_eq!(view.lit_count(), raw.count_ones() as usize);
        }

        #[test]
        fn prop_neon_view_roundtrip(on in any::<bool>()) {
            let view = NeonView { on };
            prop_assert_eq!(NeonView::from_raw(view.to_raw()), view);
        }
    }
}
