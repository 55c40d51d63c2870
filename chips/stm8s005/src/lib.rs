// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Peripheral support for the STM8S005 8-bit microcontroller.
//!
//! Only the GPIO ports are covered. On the boards this crate serves, the
//! STM8S005 is used almost entirely as a GPIO driver device; the remaining
//! peripherals are left at their power-on state.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod gpio;
