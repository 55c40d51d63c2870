// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! General Purpose Input/Output (GPIO) ports.
//!
//! Every STM8S005 port owns five byte-wide registers: ODR latches output
//! levels, IDR samples pin levels, DDR selects the direction of each bit, and
//! CR1/CR2 select the electrical mode (push-pull vs. open-drain for outputs,
//! pull-up vs. floating for inputs in CR1; output slew limit or external
//! interrupt enable in CR2). Port register blocks sit back to back starting
//! at 0x5000, five bytes apart.
//!
//! Board code accesses ports through the [`PortIo`] trait, so the
//! configuration and channel logic above this layer can run against in-memory
//! ports in unit tests instead of the memory-mapped blocks.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::register_structs;
use tock_registers::registers::{ReadOnly, ReadWrite};

register_structs! {
    /// Register block of one GPIO port.
    pub GpioRegisters {
        /// Output data register. Reads return the latched output value,
        /// not the pin level.
        (0x00 => odr: ReadWrite<u8>),
        /// Input data register. Current pin levels.
        (0x01 => idr: ReadOnly<u8>),
        /// Data direction register. 1 = output, 0 = input.
        (0x02 => ddr: ReadWrite<u8>),
        /// Control register 1. For outputs: 1 = push-pull, 0 = open-drain.
        /// For inputs: 1 = pull-up, 0 = floating.
        (0x03 => cr1: ReadWrite<u8>),
        /// Control register 2. For outputs: 1 = 10 MHz slew, 0 = 2 MHz.
        /// For inputs: 1 = external interrupt enabled.
        (0x04 => cr2: ReadWrite<u8>),
        (0x05 => @END),
    }
}

/// Number of ports with pins attached on the supported boards.
pub const NUM_PORTS: usize = 6;

/// Ports with pins attached. Port F carries no attached pin on these boards
/// and is never touched, leaving it at its power-on state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    G = 5,
}

impl PortId {
    /// All attached ports, in register-block order.
    pub const ALL: [PortId; NUM_PORTS] = [
        PortId::A,
        PortId::B,
        PortId::C,
        PortId::D,
        PortId::E,
        PortId::G,
    ];

    /// Index into arrays ordered as [`PortId::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn base(self) -> usize {
        match self {
            PortId::A => 0x5000,
            PortId::B => 0x5005,
            PortId::C => 0x500A,
            PortId::D => 0x500F,
            PortId::E => 0x5014,
            // Port F sits at 0x5019 and is skipped.
            PortId::G => 0x501E,
        }
    }
}

/// Direction and control register values for one port, computed once at
/// initialization and written through [`PortIo::configure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortConfig {
    pub ddr: u8,
    pub cr1: u8,
    pub cr2: u8,
}

/// Register-level access to one GPIO port.
pub trait PortIo {
    /// Write the direction and control registers in one shot. Called exactly
    /// once per port, before any data access.
    fn configure(&self, config: PortConfig);

    /// Drive one output bit high. Read-modify-write on ODR; no other bit of
    /// the register changes.
    fn set_output(&self, bit: u8);

    /// Drive one output bit low.
    fn clear_output(&self, bit: u8);

    /// Latched output value of one bit (ODR readback).
    fn output(&self, bit: u8) -> bool;

    /// Sampled pin level of one bit (IDR).
    fn input(&self, bit: u8) -> bool;
}

/// A memory-mapped GPIO port.
pub struct GpioPort {
    registers: *const GpioRegisters,
}

impl GpioPort {
    /// Handle to the register block of `port`. Accesses only make sense when
    /// running on the chip itself.
    pub const fn new(port: PortId) -> GpioPort {
        GpioPort {
            registers: port.base() as *const GpioRegisters,
        }
    }

    fn registers(&self) -> &GpioRegisters {
        unsafe { &*self.registers }
    }
}

/// Handles for every attached port, ordered as [`PortId::ALL`].
pub fn ports() -> [GpioPort; NUM_PORTS] {
    [
        GpioPort::new(PortId::A),
        GpioPort::new(PortId::B),
        GpioPort::new(PortId::C),
        GpioPort::new(PortId::D),
        GpioPort::new(PortId::E),
        GpioPort::new(PortId::G),
    ]
}

impl PortIo for GpioPort {
    fn configure(&self, config: PortConfig) {
        let regs = self.registers();
        regs.ddr.set(config.ddr);
        regs.cr1.set(config.cr1);
        regs.cr2.set(config.cr2);
    }

    // The read-modify-write sequences below run with every GPIO interrupt
    // disabled (CR2 input bits are cleared at configuration) and no other
    // execution context in the firmware. If a preempting subsystem ever
    // writes these registers, the sequences must move into a critical
    // section.
    fn set_output(&self, bit: u8) {
        let regs = self.registers();
        regs.odr.set(regs.odr.get() | (1 << bit));
    }

    fn clear_output(&self, bit: u8) {
        let regs = self.registers();
        regs.odr.set(regs.odr.get() & !(1 << bit));
    }

    fn output(&self, bit: u8) -> bool {
        self.registers().odr.get() & (1 << bit) != 0
    }

    fn input(&self, bit: u8) -> bool {
        self.registers().idr.get() & (1 << bit) != 0
    }
}
