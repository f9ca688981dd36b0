//! Register address map
//!
//! | Register             | Address          | Direction |
//! |----------------------|------------------|-----------|
//! | Buttons              | 0x07             | in        |
//! | TurntableP1          | 0x0F             | in        |
//! | TurntableP2          | 0x17             | in        |
//! | VolumePair(1,2)      | 0x1F             | in        |
//! | VolumePair(3,4)      | 0x27             | in        |
//! | Volume5              | 0x2F             | in        |
//! | ButtonLamps          | 0x37             | out       |
//! | SixteenSegment[1..9] | 0x3F ..= 0x7F    | out       |
//! | Spotlights           | 0x87             | out       |
//! | Neon                 | 0x8F             | out       |
//!
//! Register handles in [`reg`] carry their view type, so a register can
//! only be read or written through the view that belongs to it.

use crate::view::{ButtonsView, NeonView, RegisterView, SliderView, SpotlightsView};

/// Address byte as listed in the register map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Transfer direction of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Backplane → controller
    Input,
    /// Controller → backplane
    Output,
}

/// One of the nine sixteen-segment display cells (0 = leftmost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentCell(u8);

impl SegmentCell {
    /// Number of display cells
    pub const COUNT: usize = 9;

    /// All cells, left to right
    pub const ALL: [SegmentCell; Self::COUNT] = [
        SegmentCell(0),
        SegmentCell(1),
        SegmentCell(2),
        SegmentCell(3),
        SegmentCell(4),
        SegmentCell(5),
        SegmentCell(6),
        SegmentCell(7),
        SegmentCell(8),
    ];

    /// Cell by zero-based index, `None` past the last cell
    pub const fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Every register on the backplane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterId {
    Buttons,
    TurntableP1,
    TurntableP2,
    /// Volume sliders 1 (low nibble) and 2 (high nibble)
    VolumePair12,
    /// Volume sliders 3 (low nibble) and 4 (high nibble)
    VolumePair34,
    Volume5,
    ButtonLamps,
    SixteenSegment(SegmentCell),
    Spotlights,
    Neon,
}

impl RegisterId {
    /// Input registers in poll order
    pub const INPUTS: [RegisterId; 6] = [
        RegisterId::Buttons,
        RegisterId::TurntableP1,
        RegisterId::TurntableP2,
        RegisterId::VolumePair12,
        RegisterId::VolumePair34,
        RegisterId::Volume5,
    ];

    /// Fixed bus address
    pub const fn address(self) -> BusAddress {
        let raw = match self {
            RegisterId::Buttons => 0x07,
            RegisterId::TurntableP1 => 0x0F,
            RegisterId::TurntableP2 => 0x17,
            RegisterId::VolumePair12 => 0x1F,
            RegisterId::VolumePair34 => 0x27,
            RegisterId::Volume5 => 0x2F,
            RegisterId::ButtonLamps => 0x37,
            RegisterId::SixteenSegment(cell) => 0x3F + 8 * cell.0,
            RegisterId::Spotlights => 0x87,
            RegisterId::Neon => 0x8F,
        };
        BusAddress(raw)
    }

    pub const fn direction(self) -> Direction {
        match self {
            RegisterId::Buttons
            | RegisterId::TurntableP1
            | RegisterId::TurntableP2
            | RegisterId::VolumePair12
            | RegisterId::VolumePair34
            | RegisterId::Volume5 => Direction::Input,
            RegisterId::ButtonLamps
            | RegisterId::SixteenSegment(_)
            | RegisterId::Spotlights
            | RegisterId::Neon => Direction::Output,
        }
    }

    /// Reverse lookup from a map address
    pub fn from_address(address: BusAddress) -> Option<Self> {
        let raw = address.raw();
        if raw & 0x07 != 0x07 {
            return None;
        }
        let slot = raw >> 3;
        let id = match slot {
            0 => RegisterId::Buttons,
            1 => RegisterId::TurntableP1,
            2 => RegisterId::TurntableP2,
            3 => RegisterId::VolumePair12,
            4 => RegisterId::VolumePair34,
            5 => RegisterId::Volume5,
            6 => RegisterId::ButtonLamps,
            7..=15 => RegisterId::SixteenSegment(SegmentCell(slot - 7)),
            16 => RegisterId::Spotlights,
            17 => RegisterId::Neon,
            _ => return None,
        };
        Some(id)
    }
}

/// A register handle that knows its view type
pub trait Register: Copy {
    /// Typed interpretation of this register's byte
    type View: RegisterView;

    fn id(self) -> RegisterId;

    fn address(self) -> BusAddress {
        self.id().address()
    }
}

/// Register the controller reads from
pub trait Readable: Register {}

/// Register the controller writes to
pub trait Writable: Register {}

/// Register handles
pub mod reg {
    use super::*;

    macro_rules! register {
        ($(#[$doc:meta])* $name:ident, $view:ty, $marker:ident) => {
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl Register for $name {
                type View = $view;

                fn id(self) -> RegisterId {
                    RegisterId::$name
                }
            }

            impl $marker for $name {}
        };
    }

    register!(
        /// Effector / system buttons
        Buttons, ButtonsView, Readable
    );
    register!(
        /// Player 1 turntable position
        TurntableP1, u8, Readable
    );
    register!(
        /// Player 2 turntable position
        TurntableP2, u8, Readable
    );
    register!(VolumePair12, SliderView, Readable);
    register!(VolumePair34, SliderView, Readable);
    register!(
        /// Volume slider 5 (low nibble)
        Volume5, SliderView, Readable
    );
    register!(
        /// Button lamps, same bit layout as the button inputs
        ButtonLamps, ButtonsView, Writable
    );
    register!(Spotlights, SpotlightsView, Writable);
    register!(Neon, NeonView, Writable);

    /// A sixteen-segment cell takes one character byte
    impl Register for SegmentCell {
        type View = u8;

        fn id(self) -> RegisterId {
            RegisterId::SixteenSegment(self)
        }
    }

    impl Writable for SegmentCell {}
}
