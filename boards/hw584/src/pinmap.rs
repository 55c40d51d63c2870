// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Per-variant pin role tables and the logical-channel mapping.
//!
//! Each hardware variant carries one complete, self-contained table assigning
//! every attached pin a role and, where the pin serves a logical channel, the
//! channel it serves. The tables reproduce the board pinout bit-exact; the
//! register images in [`crate::image`] and the channel lookups here are both
//! derived from them and from nothing else.
//!
//! Pins the board schematic leaves open ("not used") are configured as
//! pulled-up inputs and deliberately carry no channel.

use stm8s005::gpio::{PortId, NUM_PORTS};

use crate::Error;

/// The three mutually exclusive hardware variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// 16 relay outputs.
    SixteenOutputs,
    /// 8 relay outputs, 8 sense inputs.
    EightOutEightIn,
    /// 16 sense inputs.
    SixteenInputs,
}

impl Variant {
    /// Decode the build-time variant setting (1..=3).
    pub fn from_setting(setting: u8) -> Result<Variant, Error> {
        match setting {
            1 => Ok(Variant::SixteenOutputs),
            2 => Ok(Variant::EightOutEightIn),
            3 => Ok(Variant::SixteenInputs),
            _ => Err(Error::InvalidVariant(setting)),
        }
    }

    /// The complete pin role table of this variant.
    pub const fn pin_table(self) -> &'static PinTable {
        match self {
            Variant::SixteenOutputs => &SIXTEEN_OUTPUTS,
            Variant::EightOutEightIn => &EIGHT_OUT_EIGHT_IN,
            Variant::SixteenInputs => &SIXTEEN_INPUTS,
        }
    }
}

/// Electrical configuration of one attached pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Driven high and low. Used for the LED and the ENC28J60 link outputs.
    OutputPushPull,
    /// Drives low, releases high. Used for the relay controls.
    OutputOpenDrain,
    /// Input with the internal pull-up enabled.
    InputPullUp,
    /// Pin owned by an alternate function (SWIM debug/programming). The
    /// register image must leave its bits at their power-on state.
    Alternate,
    /// No board function. Kept as a pulled-up input.
    Unused,
}

impl Role {
    pub const fn is_output(self) -> bool {
        matches!(self, Role::OutputPushPull | Role::OutputOpenDrain)
    }
}

/// Output slew limit, CR2. Only the ENC28J60 link outputs run at 10 MHz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputSpeed {
    Speed2MHz,
    Speed10MHz,
}

/// Semantic I/O channels, independent of pin location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Relay driver `n`, 1..=16.
    Relay(u8),
    /// Sense input `n`, 1..=16.
    Input(u8),
    /// Status LED.
    Led,
    /// -RstButton. Low while pressed.
    ResetButton,
    /// ENC28J60 -CS.
    SpiCs,
    /// ENC28J60 SCK.
    SpiSck,
    /// ENC28J60 SI, our data out.
    SpiMosi,
    /// ENC28J60 SO, our data in.
    SpiMiso,
    /// ENC28J60 -RESET.
    EthernetReset,
    /// ENC28J60 -INT.
    EthernetInterrupt,
}

impl Channel {
    /// Whether this channel drives its pin (as opposed to sampling it).
    const fn drives_pin(self) -> bool {
        matches!(
            self,
            Channel::Relay(_)
                | Channel::Led
                | Channel::SpiCs
                | Channel::SpiSck
                | Channel::SpiMosi
                | Channel::EthernetReset
        )
    }
}

/// Role of one attached pin, plus the channel it serves (if any).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinAssignment {
    pub role: Role,
    pub speed: OutputSpeed,
    pub channel: Option<Channel>,
}

/// Complete role assignment of one variant, indexed by [`PortId::index`] and
/// bit position. `None` marks a bit not bonded to a pin.
#[derive(Clone)]
pub struct PinTable {
    pub pins: [[Option<PinAssignment>; 8]; NUM_PORTS],
}

// Fixed pins, identical across all three variants.
pub const LED: (PortId, u8) = (PortId::A, 2);
pub const RESET_BUTTON: (PortId, u8) = (PortId::A, 1);
pub const SPI_CS: (PortId, u8) = (PortId::C, 1);
pub const SPI_SCK: (PortId, u8) = (PortId::C, 2);
pub const SPI_MOSI: (PortId, u8) = (PortId::C, 3);
pub const SPI_MISO: (PortId, u8) = (PortId::C, 4);
pub const ETHERNET_INTERRUPT: (PortId, u8) = (PortId::C, 5);
pub const ETHERNET_RESET: (PortId, u8) = (PortId::E, 5);

const NC: Option<PinAssignment> = None;

const fn pin(role: Role, speed: OutputSpeed, channel: Option<Channel>) -> Option<PinAssignment> {
    Some(PinAssignment {
        role,
        speed,
        channel,
    })
}

const fn out_pp(channel: Channel) -> Option<PinAssignment> {
    pin(Role::OutputPushPull, OutputSpeed::Speed2MHz, Some(channel))
}

const fn out_od(channel: Channel) -> Option<PinAssignment> {
    pin(Role::OutputOpenDrain, OutputSpeed::Speed2MHz, Some(channel))
}

const fn out_fast(channel: Channel) -> Option<PinAssignment> {
    pin(Role::OutputPushPull, OutputSpeed::Speed10MHz, Some(channel))
}

const fn in_pu(channel: Channel) -> Option<PinAssignment> {
    pin(Role::InputPullUp, OutputSpeed::Speed2MHz, Some(channel))
}

const fn unused() -> Option<PinAssignment> {
    pin(Role::Unused, OutputSpeed::Speed2MHz, None)
}

const fn swim() -> Option<PinAssignment> {
    pin(Role::Alternate, OutputSpeed::Speed2MHz, None)
}

/// Variant 1: 16 relay outputs.
pub static SIXTEEN_OUTPUTS: PinTable = PinTable {
    pins: [
        // Port A
        [
            NC,                                    // bit 0
            in_pu(Channel::ResetButton),           // bit 1, pin 02
            out_pp(Channel::Led),                  // bit 2, pin 03
            out_od(Channel::Relay(1)),             // bit 3, pin 09
            out_od(Channel::Relay(9)),             // bit 4, pin 10
            out_od(Channel::Relay(2)),             // bit 5, pin 11
            unused(),                              // bit 6, pin 12
            NC,                                    // bit 7
        ],
        // Port B, pins 15..22: nothing attached beyond the pads
        [
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
        ],
        // Port C
        [
            NC,                                    // bit 0
            out_fast(Channel::SpiCs),              // bit 1, pin 26
            out_fast(Channel::SpiSck),             // bit 2, pin 27
            out_fast(Channel::SpiMosi),            // bit 3, pin 28
            in_pu(Channel::SpiMiso),               // bit 4, pin 29
            in_pu(Channel::EthernetInterrupt),     // bit 5, pin 30
            out_od(Channel::Relay(16)),            // bit 6, pin 33
            out_od(Channel::Relay(8)),             // bit 7, pin 34
        ],
        // Port D
        [
            out_od(Channel::Relay(13)),            // bit 0, pin 41
            swim(),                                // bit 1, pin 42
            out_od(Channel::Relay(5)),             // bit 2, pin 43
            out_od(Channel::Relay(12)),            // bit 3, pin 44
            out_od(Channel::Relay(4)),             // bit 4, pin 45
            out_od(Channel::Relay(11)),            // bit 5, pin 46
            out_od(Channel::Relay(3)),             // bit 6, pin 47
            out_od(Channel::Relay(10)),            // bit 7, pin 48
        ],
        // Port E
        [
            out_od(Channel::Relay(6)),             // bit 0, pin 40
            unused(),                              // bit 1, pin 39
            unused(),                              // bit 2, pin 38
            out_od(Channel::Relay(14)),            // bit 3, pin 37
            NC,                                    // bit 4
            out_fast(Channel::EthernetReset),      // bit 5, pin 25
            unused(),                              // bit 6, pin 24
            unused(),                              // bit 7, pin 23
        ],
        // Port G
        [
            out_od(Channel::Relay(15)),            // bit 0, pin 35
            out_od(Channel::Relay(7)),             // bit 1, pin 36
            NC,
            NC,
            NC,
            NC,
            NC,
            NC,
        ],
    ],
};

/// Variant 2: 8 relay outputs, 8 sense inputs.
pub static EIGHT_OUT_EIGHT_IN: PinTable = PinTable {
    pins: [
        // Port A
        [
            NC,                                    // bit 0
            in_pu(Channel::ResetButton),           // bit 1, pin 02
            out_pp(Channel::Led),                  // bit 2, pin 03
            out_od(Channel::Relay(1)),             // bit 3, pin 09
            in_pu(Channel::Input(1)),              // bit 4, pin 10
            out_od(Channel::Relay(2)),             // bit 5, pin 11
            unused(),                              // bit 6, pin 12
            NC,                                    // bit 7
        ],
        // Port B, pins 15..22: nothing attached beyond the pads
        [
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
        ],
        // Port C
        [
            NC,                                    // bit 0
            out_fast(Channel::SpiCs),              // bit 1, pin 26
            out_fast(Channel::SpiSck),             // bit 2, pin 27
            out_fast(Channel::SpiMosi),            // bit 3, pin 28
            in_pu(Channel::SpiMiso),               // bit 4, pin 29
            in_pu(Channel::EthernetInterrupt),     // bit 5, pin 30
            in_pu(Channel::Input(8)),              // bit 6, pin 33
            out_od(Channel::Relay(8)),             // bit 7, pin 34
        ],
        // Port D
        [
            in_pu(Channel::Input(5)),              // bit 0, pin 41
            swim(),                                // bit 1, pin 42
            out_od(Channel::Relay(5)),             // bit 2, pin 43
            in_pu(Channel::Input(4)),              // bit 3, pin 44
            out_od(Channel::Relay(4)),             // bit 4, pin 45
            in_pu(Channel::Input(3)),              // bit 5, pin 46
            out_od(Channel::Relay(3)),             // bit 6, pin 47
            in_pu(Channel::Input(2)),              // bit 7, pin 48
        ],
        // Port E
        [
            out_od(Channel::Relay(6)),             // bit 0, pin 40
            unused(),                              // bit 1, pin 39
            unused(),                              // bit 2, pin 38
            in_pu(Channel::Input(6)),              // bit 3, pin 37
            NC,                                    // bit 4
            out_fast(Channel::EthernetReset),      // bit 5, pin 25
            unused(),                              // bit 6, pin 24
            unused(),                              // bit 7, pin 23
        ],
        // Port G
        [
            in_pu(Channel::Input(7)),              // bit 0, pin 35
            out_od(Channel::Relay(7)),             // bit 1, pin 36
            NC,
            NC,
            NC,
            NC,
            NC,
            NC,
        ],
    ],
};

/// Variant 3: 16 sense inputs.
pub static SIXTEEN_INPUTS: PinTable = PinTable {
    pins: [
        // Port A
        [
            NC,                                    // bit 0
            in_pu(Channel::ResetButton),           // bit 1, pin 02
            out_pp(Channel::Led),                  // bit 2, pin 03
            in_pu(Channel::Input(1)),              // bit 3, pin 09
            in_pu(Channel::Input(9)),              // bit 4, pin 10
            in_pu(Channel::Input(2)),              // bit 5, pin 11
            unused(),                              // bit 6, pin 12
            NC,                                    // bit 7
        ],
        // Port B, pins 15..22: nothing attached beyond the pads
        [
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
            unused(),
        ],
        // Port C
        [
            NC,                                    // bit 0
            out_fast(Channel::SpiCs),              // bit 1, pin 26
            out_fast(Channel::SpiSck),             // bit 2, pin 27
            out_fast(Channel::SpiMosi),            // bit 3, pin 28
            in_pu(Channel::SpiMiso),               // bit 4, pin 29
            in_pu(Channel::EthernetInterrupt),     // bit 5, pin 30
            in_pu(Channel::Input(16)),             // bit 6, pin 33
            in_pu(Channel::Input(8)),              // bit 7, pin 34
        ],
        // Port D
        [
            in_pu(Channel::Input(13)),             // bit 0, pin 41
            swim(),                                // bit 1, pin 42
            in_pu(Channel::Input(5)),              // bit 2, pin 43
            in_pu(Channel::Input(12)),             // bit 3, pin 44
            in_pu(Channel::Input(4)),              // bit 4, pin 45
            in_pu(Channel::Input(11)),             // bit 5, pin 46
            in_pu(Channel::Input(3)),              // bit 6, pin 47
            in_pu(Channel::Input(10)),             // bit 7, pin 48
        ],
        // Port E
        [
            in_pu(Channel::Input(6)),              // bit 0, pin 40
            unused(),                              // bit 1, pin 39
            unused(),                              // bit 2, pin 38
            in_pu(Channel::Input(14)),             // bit 3, pin 37
            NC,                                    // bit 4
            out_fast(Channel::EthernetReset),      // bit 5, pin 25
            unused(),                              // bit 6, pin 24
            unused(),                              // bit 7, pin 23
        ],
        // Port G
        [
            in_pu(Channel::Input(15)),             // bit 0, pin 35
            in_pu(Channel::Input(7)),              // bit 1, pin 36
            NC,
            NC,
            NC,
            NC,
            NC,
            NC,
        ],
    ],
};

/// Resolve a channel to its (port, bit) location under `variant`.
///
/// Channels the variant does not define (relay numbers on an input-only
/// build, sense numbers on an output-only build, numbers outside the
/// populated range) resolve to [`Error::UndefinedChannel`].
pub fn lookup(variant: Variant, channel: Channel) -> Result<(PortId, u8), Error> {
    let table = variant.pin_table();
    for (index, port) in PortId::ALL.iter().enumerate() {
        for bit in 0..8 {
            if let Some(assignment) = table.pins[index][bit] {
                if assignment.channel == Some(channel) {
                    return Ok((*port, bit as u8));
                }
            }
        }
    }
    Err(Error::UndefinedChannel(channel))
}

/// Check one role table for internal consistency.
///
/// Rejected defects, all reported as [`Error::RoleConflict`] at the offending
/// (port, bit): a channel claimed by two pins, a channel on an alternate or
/// unused pin, a channel whose direction disagrees with the pin role, a
/// relay or sense number outside 1..=16, and a 10 MHz slew setting on a
/// non-output. Runs before any register is written; a failure aborts
/// initialization.
pub fn validate(table: &PinTable) -> Result<(), Error> {
    let mut seen: [Option<Channel>; 64] = [None; 64];
    let mut seen_count = 0;

    for (index, &port) in PortId::ALL.iter().enumerate() {
        for bit in 0..8 {
            let assignment = match table.pins[index][bit] {
                Some(assignment) => assignment,
                None => continue,
            };
            let conflict = Err(Error::RoleConflict(port, bit as u8));

            if matches!(assignment.speed, OutputSpeed::Speed10MHz)
                && !assignment.role.is_output()
            {
                return conflict;
            }

            let channel = match assignment.channel {
                Some(channel) => channel,
                None => continue,
            };

            match assignment.role {
                Role::Alternate | Role::Unused => return conflict,
                _ => {}
            }
            if channel.drives_pin() != assignment.role.is_output() {
                return conflict;
            }
            if let Channel::Relay(n) | Channel::Input(n) = channel {
                if n < 1 || n > 16 {
                    return conflict;
                }
            }
            if seen[..seen_count].contains(&Some(channel)) {
                return conflict;
            }
            seen[seen_count] = Some(channel);
            seen_count += 1;
        }
    }
    Ok(())
}
