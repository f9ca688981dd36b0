//! Register transfer engine
//!
//! Composes the address phase, ack sample and data phase into one
//! transfer. Two details differ between backplane firmware revisions and
//! are selected through [`ProtocolRevision`]:
//!
//! - how the low three address bits are fixed before transmission
//! - whether the outgoing data byte is inverted on the wire

use embedded_hal::delay::DelayNs;
use twinkle_hal::BusLines;

use crate::address::{BusAddress, Readable, Register, Writable};
use crate::transport::BitTransport;
use crate::view::RegisterView;

/// Byte clocked out when reading an input register
pub const READ_FILL: u8 = 0xFF;

/// How the address byte is prepared for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressMode {
    /// `address | 0x07`: low three bits forced high, upper bits kept
    #[default]
    ForceLowBits,
    /// `address & 0x07`: only the low three bits are kept
    MaskLowBits,
}

impl AddressMode {
    pub const fn apply(self, address: u8) -> u8 {
        match self {
            AddressMode::ForceLowBits => address | 0x07,
            AddressMode::MaskLowBits => address & 0x07,
        }
    }
}

/// Polarity of the outgoing data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataPolarity {
    #[default]
    Normal,
    /// Every outgoing data bit is inverted
    Inverted,
}

impl DataPolarity {
    pub const fn apply(self, data: u8) -> u8 {
        match self {
            DataPolarity::Normal => data,
            DataPolarity::Inverted => !data,
        }
    }
}

/// Wire-level protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolRevision {
    pub address_mode: AddressMode,
    pub data_polarity: DataPolarity,
}

/// Result of one raw transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transfer {
    /// Byte shifted in during the data phase
    pub data: u8,
    /// Device pulled DataIn low after the address phase
    pub ack: bool,
}

/// Typed result of reading a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading<V> {
    pub value: V,
    pub ack: bool,
}

/// Bus master: performs register transfers over a [`BitTransport`]
pub struct BusMaster<L, D> {
    transport: BitTransport<L, D>,
    revision: ProtocolRevision,
}

impl<L: BusLines, D: DelayNs> BusMaster<L, D> {
    /// Create a bus master
    ///
    /// # Arguments
    /// - `lines`: the four backplane lines
    /// - `delay`: blocking delay used for bit timing
    /// - `bit_delay_us`: setup and hold time per clock half
    /// - `revision`: wire-level protocol variant
    pub fn new(lines: L, delay: D, bit_delay_us: u32, revision: ProtocolRevision) -> Self {
        Self {
            transport: BitTransport::new(lines, delay, bit_delay_us),
            revision,
        }
    }

    pub fn revision(&self) -> ProtocolRevision {
        self.revision
    }

    /// Perform one transfer: address phase, ack sample, data phase
    ///
    /// A missing ack does not abort the transfer. The data phase always
    /// runs and whatever the bus yields is returned with `ack == false`.
    pub fn transfer(&mut self, address: BusAddress, data: u8) -> Transfer {
        let address = self.revision.address_mode.apply(address.raw());
        let outgoing = self.revision.data_polarity.apply(data);

        self.transport.select();

        for i in (0..8).rev() {
            self.transport.write_bit((address >> i) & 1 != 0);
        }

        // Ack is active-low
        let ack = !self.transport.sample();

        let mut received = 0u8;
        for i in (0..8).rev() {
            let bit = self.transport.exchange_bit((outgoing >> i) & 1 != 0);
            received |= (bit as u8) << i;
        }

        self.transport.deselect();

        Transfer {
            data: received,
            ack,
        }
    }

    /// Read an input register through its view
    pub fn read<R: Readable>(&mut self, register: R) -> Reading<R::View> {
        let transfer = self.transfer(register.address(), READ_FILL);
        Reading {
            value: R::View::from_raw(transfer.data),
            ack: transfer.ack,
        }
    }

    /// Write an output register through its view, returning the ack flag
    pub fn write<R: Writable>(&mut self, register: R, value: &R::View) -> bool {
        self.transfer(register.address(), value.to_raw()).ack
    }

    pub fn transport(&self) -> &BitTransport<L, D> {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut BitTransport<L, D> {
        &mut self.transport
    }

    /// Give back the lines and delay
    pub fn release(self) -> (L, D) {
        self.transport.release()
    }
}
