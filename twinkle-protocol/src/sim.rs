//! Simulated backplane for host-side testing
//!
//! [`SimLines`] plays the device side of the bus. It watches the clock
//! and enable lines the way the real backplane does:
//!
//! - rising edges 1-8 latch the address from DataOut
//! - after edge 8, DataIn goes low (ack) unless the slot is set to NACK
//! - rising edges 9-16 latch the data byte and drive the response byte
//! - enable going high closes the transfer and appends it to the log
//!
//! Responses are keyed by address slot (`address >> 3`).

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use twinkle_hal::BusLines;

use crate::address::BusAddress;

/// Transfers kept in the log before new ones are dropped
pub const SIM_LOG_CAPACITY: usize = 64;

const SLOTS: usize = 32;

/// One completed transfer as seen by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimTransfer {
    /// Address byte as it appeared on the wire
    pub address: u8,
    /// Data byte as it appeared on the wire
    pub sent: u8,
    /// Byte the device drove back
    pub received: u8,
    /// Rising clock edges while selected
    pub clocks: u8,
}

/// Device side of the backplane
#[derive(Debug, Clone)]
pub struct SimLines {
    clock: bool,
    enable: bool,
    data: bool,
    input: bool,
    edges: u8,
    address: u8,
    shift: u8,
    responses: [u8; SLOTS],
    nack: u32,
    clock_cycles: u32,
    log: Vec<SimTransfer, SIM_LOG_CAPACITY>,
}

impl Default for SimLines {
    fn default() -> Self {
        Self::new()
    }
}

impl SimLines {
    /// Idle bus, every slot acks and answers 0x00
    pub fn new() -> Self {
        Self {
            clock: true,
            enable: true,
            data: false,
            input: true,
            edges: 0,
            address: 0,
            shift: 0,
            responses: [0; SLOTS],
            nack: 0,
            clock_cycles: 0,
            log: Vec::new(),
        }
    }

    fn slot(address: u8) -> usize {
        (address >> 3) as usize % SLOTS
    }

    /// Byte the device answers for `address`
    pub fn set_response(&mut self, address: BusAddress, value: u8) {
        self.responses[Self::slot(address.raw())] = value;
    }

    /// Make `address` answer data without acknowledging
    pub fn set_nack(&mut self, address: BusAddress, nack: bool) {
        let mask = 1u32 << Self::slot(address.raw());
        if nack {
            self.nack |= mask;
        } else {
            self.nack &= !mask;
        }
    }

    /// Completed transfers, oldest first
    pub fn log(&self) -> &[SimTransfer] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.clock_cycles = 0;
    }

    /// Rising clock edges seen while the device was selected
    pub fn clock_cycles(&self) -> u32 {
        self.clock_cycles
    }

    pub fn clock_high(&self) -> bool {
        self.clock
    }

    pub fn selected(&self) -> bool {
        !self.enable
    }

    fn rising_edge(&mut self) {
        self.edges = self.edges.saturating_add(1);
        self.clock_cycles += 1;

        match self.edges {
            1..=8 => {
                self.address = (self.address << 1) | self.data as u8;
                if self.edges == 8 {
                    let nacked = self.nack & (1 << Self::slot(self.address)) != 0;
                    self.input = nacked;
                }
            }
            9..=16 => {
                self.shift = (self.shift << 1) | self.data as u8;
                let bit = 16 - self.edges;
                let response = self.responses[Self::slot(self.address)];
                self.input = (response >> bit) & 1 != 0;
            }
            _ => {}
        }
    }

    fn begin(&mut self) {
        self.edges = 0;
        self.address = 0;
        self.shift = 0;
        self.input = true;
    }

    fn end(&mut self) {
        let transfer = SimTransfer {
            address: self.address,
            sent: self.shift,
            received: self.responses[Self::slot(self.address)],
            clocks: self.edges,
        };
        let _ = self.log.push(transfer);
        self.input = true;
    }
}

impl BusLines for SimLines {
    fn set_clock(&mut self, high: bool) {
        if high && !self.clock && !self.enable {
            self.rising_edge();
        }
        self.clock = high;
    }

    fn set_data(&mut self, high: bool) {
        self.data = high;
    }

    fn read_input(&mut self) -> bool {
        self.input
    }

    fn set_enable(&mut self, high: bool) {
        match (self.enable, high) {
            (true, false) => self.begin(),
            (false, true) => self.end(),
            _ => {}
        }
        self.enable = high;
    }
}

/// Delay that returns immediately and counts what was asked of it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay {
    total_ns: u64,
}

impl NoDelay {
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
