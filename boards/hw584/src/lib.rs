// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Board support for the Web_Relay_Con V2.0 HW-584 network module.
//!
//! The module pairs an STM8S005 with an ENC28J60 Ethernet controller and
//! drives up to 16 relay outputs and/or reads up to 16 digital sense inputs.
//! Several pins are shared with fixed functions: a status LED, a reset
//! button, the SWIM debug/programming pin, and the four bit-banged SPI lines
//! to the ENC28J60. Exactly one of three mutually exclusive hardware variants
//! is built: 16 outputs, 8 outputs / 8 inputs, or 16 inputs.
//!
//! [`pinmap`] holds the per-variant pin role tables and the logical-channel
//! mapping, [`image`] derives the per-port register values from them,
//! [`gpio`] exposes the channel-level operations, and [`net`] declares the
//! tuning constants the uIP TCP/IP stack consumes.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod gpio;
pub mod image;
pub mod net;
pub mod pinmap;

pub use gpio::Gpio;
pub use pinmap::{Channel, Variant};

use stm8s005::gpio::PortId;

/// Build-time hardware variant selection: 1 = sixteen outputs, 2 = eight
/// outputs / eight inputs, 3 = sixteen inputs. Validated during
/// initialization and fixed for the life of the binary.
pub const VARIANT_SETTING: u8 = 1;

/// Configuration and channel errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The hardware-variant setting is outside 1..=3. Fatal: initialization
    /// must not proceed, since a wrong register image can mis-drive relays.
    InvalidVariant(u8),
    /// A pin role table assigns conflicting roles or channels to this
    /// (port, bit). A table defect, caught by validation before any register
    /// is written.
    RoleConflict(PortId, u8),
    /// The requested channel is not defined under the active variant. The
    /// call performs no register access; the caller may carry on.
    UndefinedChannel(Channel),
}
