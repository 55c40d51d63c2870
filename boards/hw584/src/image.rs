// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Derivation of the per-port register images from a pin role table.
//!
//! [`build`] is a pure function of the variant's table: the same variant
//! always yields the same six DDR/CR1/CR2 triples. The images are written to
//! the hardware exactly once, during initialization, before any channel
//! operation runs.

use stm8s005::gpio::{PortConfig, NUM_PORTS};

use crate::pinmap::{OutputSpeed, Variant};

/// Compute the direction and control register images for `variant`.
///
/// DDR: 1 exactly where the role is an output. The SWIM pin contributes
/// nothing, leaving the debug function at its power-on state.
///
/// CR1: all ones on every port. Outputs run push-pull, attached inputs run
/// with the pull-up enabled, and unattached bits sit as pulled-up inputs too.
///
/// CR2: 1 only for the 10 MHz ENC28J60 link outputs. Every input bit stays 0,
/// which also keeps its external interrupt disabled.
pub fn build(variant: Variant) -> [PortConfig; NUM_PORTS] {
    let table = variant.pin_table();
    let mut images = [PortConfig {
        ddr: 0,
        cr1: 0xFF,
        cr2: 0,
    }; NUM_PORTS];

    for (index, image) in images.iter_mut().enumerate() {
        for bit in 0..8 {
            let mask = 1u8 << bit;
            if let Some(assignment) = table.pins[index][bit] {
                if assignment.role.is_output() {
                    image.ddr |= mask;
                    if assignment.speed == OutputSpeed::Speed10MHz {
                        image.cr2 |= mask;
                    }
                }
            }
        }
    }
    images
}
