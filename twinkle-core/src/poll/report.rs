//! Per-tick outcome

use twinkle_protocol::{BusAddress, RegisterId};

/// Set of registers, one bit per address slot
///
/// Used to report which registers did not acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AckMask(u32);

impl AckMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(register: RegisterId) -> u32 {
        1 << (register.address().raw() >> 3)
    }

    /// Record a transfer; only a missing ack sets the register's bit
    pub fn record(&mut self, register: RegisterId, ack: bool) {
        if !ack {
            self.0 |= Self::bit(register);
        }
    }

    pub fn contains(&self, register: RegisterId) -> bool {
        self.0 & Self::bit(register) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Registers in `self` or `other` but not both
    pub fn changed(&self, other: AckMask) -> AckMask {
        AckMask(self.0 ^ other.0)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Registers in the set, lowest address first
    pub fn iter(&self) -> impl Iterator<Item = RegisterId> {
        let bits = self.0;
        (0..32u8)
            .filter(move |slot| bits & (1 << slot) != 0)
            .filter_map(|slot| RegisterId::from_address(BusAddress::new((slot << 3) | 0x07)))
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Registers that did not acknowledge
    pub missed: AckMask,
    /// Text cursor advanced
    pub scrolled: bool,
    /// Lamp chase advanced
    pub chased: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinkle_protocol::SegmentCell;

    #[test]
    fn test_record_only_misses() {
        let mut mask = AckMask::empty();
        mask.record(RegisterId::Buttons, true);
        assert!(mask.is_empty());

        mask.record(RegisterId::Neon, false);
        mask.record(RegisterId::SixteenSegment(SegmentCell::ALL[8]), false);
        assert!(mask.contains(RegisterId::Neon));
        assert!(mask.contains(RegisterId::SixteenSegment(SegmentCell::ALL[8])));
        assert!(!mask.contains(RegisterId::Buttons));
        assert_eq!(mask.len(), 2);
        // Neon is slot 17, the last segment cell slot 15
        assert_eq!(mask.raw(), (1 << 17) | (1 << 15));
    }

    #[test]
    fn test_changed() {
        let mut before = AckMask::empty();
        before.record(RegisterId::TurntableP1, false);
        let mut after = AckMask::empty();
        after.record(RegisterId::TurntableP2, false);

        let changed = before.changed(after);
        assert!(changed.contains(RegisterId::TurntableP1));
        assert!(changed.contains(RegisterId::TurntableP2));
        assert_eq!(changed.len(), 2);
    }

    #[test]
    fn test_iter_in_address_order() {
        let mut mask = AckMask::empty();
        mask.record(RegisterId::Neon, false);
        mask.record(RegisterId::Buttons, false);
        mask.record(RegisterId::SixteenSegment(SegmentCell::ALL[2]), false);

        let ids: heapless::Vec<RegisterId, 4> = mask.iter().collect();
        assert_eq!(
            &ids[..],
            &[
                RegisterId::Buttons,
                RegisterId::SixteenSegment(SegmentCell::ALL[2]),
                RegisterId::Neon,
            ]
        );
    }
}
