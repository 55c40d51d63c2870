// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Channel-level I/O operations.
//!
//! [`Gpio`] is the one owner of the configured port registers. Constructing
//! it validates the variant setting and its pin table, computes the register
//! images, and writes them to the ports; operations exist only on the
//! constructed value, so nothing can touch a data register before
//! configuration completes.

use stm8s005::gpio::{GpioPort, PortId, PortIo, NUM_PORTS};

use crate::image;
use crate::pinmap::{self, Channel, Variant};
use crate::Error;

/// The configured GPIO subsystem.
pub struct Gpio<P: PortIo> {
    ports: [P; NUM_PORTS],
    variant: Variant,
}

impl Gpio<GpioPort> {
    /// Bring up the on-chip ports for the build-time variant setting
    /// ([`crate::VARIANT_SETTING`]). Runs once at boot, before the ENC28J60
    /// driver or any relay/input caller.
    pub fn initialize() -> Result<Gpio<GpioPort>, Error> {
        Gpio::with_ports(crate::VARIANT_SETTING, stm8s005::gpio::ports())
    }
}

impl<P: PortIo> Gpio<P> {
    /// Validate `setting` and the selected variant's pin table, then write
    /// each port's register image. No register is touched on any error.
    pub fn with_ports(setting: u8, ports: [P; NUM_PORTS]) -> Result<Gpio<P>, Error> {
        let variant = Variant::from_setting(setting)?;
        pinmap::validate(variant.pin_table())?;
        for (port, config) in ports.iter().zip(image::build(variant)) {
            port.configure(config);
        }
        Ok(Gpio { ports, variant })
    }

    /// The active hardware variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    fn write(&self, (port, bit): (PortId, u8), high: bool) {
        let port = &self.ports[port.index()];
        if high {
            port.set_output(bit);
        } else {
            port.clear_output(bit);
        }
    }

    fn read(&self, (port, bit): (PortId, u8)) -> bool {
        self.ports[port.index()].input(bit)
    }

    /// Drive relay control `n` (1..=16) high or low. Fails without touching
    /// any register if the active variant does not define relay `n`.
    pub fn set_relay(&self, n: u8, on: bool) -> Result<(), Error> {
        let location = pinmap::lookup(self.variant, Channel::Relay(n))?;
        self.write(location, on);
        Ok(())
    }

    /// Level of sense input `n` (1..=16). Fails if the active variant does
    /// not define input `n`.
    pub fn read_input(&self, n: u8) -> Result<bool, Error> {
        let location = pinmap::lookup(self.variant, Channel::Input(n))?;
        Ok(self.read(location))
    }

    /// Drive the status LED. The LED sits on the same fixed pin (PA2) under
    /// every variant, so no channel resolution is involved. `true` lights it.
    pub fn set_led(&self, on: bool) {
        self.write(pinmap::LED, on);
    }

    /// Raw level of the -RstButton pin (PA1). Low while pressed.
    pub fn read_reset_button(&self) -> bool {
        self.read(pinmap::RESET_BUTTON)
    }
}

/// Raw pin primitives for the ENC28J60 driver's bit-banged SPI link. Levels
/// are electrical; -CS and -RESET are active low. Not part of the
/// relay/input channel surface.
impl<P: PortIo> Gpio<P> {
    pub fn set_spi_cs(&self, high: bool) {
        self.write(pinmap::SPI_CS, high);
    }

    pub fn set_spi_sck(&self, high: bool) {
        self.write(pinmap::SPI_SCK, high);
    }

    pub fn set_spi_mosi(&self, high: bool) {
        self.write(pinmap::SPI_MOSI, high);
    }

    pub fn read_spi_miso(&self) -> bool {
        self.read(pinmap::SPI_MISO)
    }

    pub fn set_ethernet_reset(&self, high: bool) {
        self.write(pinmap::ETHERNET_RESET, high);
    }

    pub fn read_ethernet_interrupt(&self) -> bool {
        self.read(pinmap::ETHERNET_INTERRUPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use stm8s005::gpio::PortConfig;

    /// In-memory stand-in for one port's register block.
    struct FakePort {
        odr: Cell<u8>,
        idr: Cell<u8>,
        config: Cell<Option<PortConfig>>,
        data_writes: Cell<usize>,
    }

    impl FakePort {
        fn new() -> FakePort {
            FakePort {
                odr: Cell::new(0),
                idr: Cell::new(0),
                config: Cell::new(None),
                data_writes: Cell::new(0),
            }
        }
    }

    impl PortIo for FakePort {
        fn configure(&self, config: PortConfig) {
            self.config.set(Some(config));
        }

        fn set_output(&self, bit: u8) {
            self.odr.set(self.odr.get() | (1 << bit));
            self.data_writes.set(self.data_writes.get() + 1);
        }

        fn clear_output(&self, bit: u8) {
            self.odr.set(self.odr.get() & !(1 << bit));
            self.data_writes.set(self.data_writes.get() + 1);
        }

        fn output(&self, bit: u8) -> bool {
            self.odr.get() & (1 << bit) != 0
        }

        fn input(&self, bit: u8) -> bool {
            self.idr.get() & (1 << bit) != 0
        }
    }

    fn fake_gpio(setting: u8) -> Gpio<FakePort> {
        Gpio::with_ports(setting, core::array::from_fn(|_| FakePort::new())).unwrap()
    }

    fn total_data_writes(gpio: &Gpio<FakePort>) -> usize {
        gpio.ports.iter().map(|p| p.data_writes.get()).sum()
    }

    #[test]
    fn invalid_setting_refuses_initialization() {
        for setting in [0, 4, 200] {
            let ports: [FakePort; NUM_PORTS] = core::array::from_fn(|_| FakePort::new());
            match Gpio::with_ports(setting, ports) {
                Err(Error::InvalidVariant(s)) => assert_eq!(s, setting),
                other => panic!("expected InvalidVariant, got {:?}", other.err()),
            }
        }
    }

    #[test]
    fn initialization_configures_every_port_once() {
        let gpio = fake_gpio(1);
        let images = image::build(Variant::SixteenOutputs);
        for (port, image) in gpio.ports.iter().zip(images) {
            assert_eq!(port.config.get(), Some(image));
        }
        assert_eq!(total_data_writes(&gpio), 0);
    }

    #[test]
    fn led_touches_only_bit_two_of_port_a() {
        let gpio = fake_gpio(1);
        let port_a = &gpio.ports[PortId::A.index()];

        port_a.odr.set(0x51);
        gpio.set_led(true);
        assert_eq!(port_a.odr.get(), 0x55);

        port_a.odr.set(0xFF);
        gpio.set_led(false);
        assert_eq!(port_a.odr.get(), 0xFB);
    }

    #[test]
    fn undefined_relay_performs_no_register_write() {
        let gpio = fake_gpio(3);
        for n in 1..=16 {
            assert_eq!(
                gpio.set_relay(n, true),
                Err(Error::UndefinedChannel(Channel::Relay(n)))
            );
        }
        assert_eq!(total_data_writes(&gpio), 0);
    }

    #[test]
    fn inputs_are_undefined_under_sixteen_outputs() {
        let gpio = fake_gpio(1);
        for n in 1..=16 {
            assert_eq!(
                gpio.read_input(n),
                Err(Error::UndefinedChannel(Channel::Input(n)))
            );
        }
    }

    #[test]
    fn high_relay_numbers_are_undefined_under_eight_out_eight_in() {
        let gpio = fake_gpio(2);
        for n in 9..=16 {
            assert_eq!(
                gpio.set_relay(n, true),
                Err(Error::UndefinedChannel(Channel::Relay(n)))
            );
        }
        assert_eq!(total_data_writes(&gpio), 0);
    }

    #[test]
    fn relay_round_trip_reads_back_on_relay_variants() {
        for (setting, relay_count) in [(1u8, 16u8), (2, 8)] {
            let gpio = fake_gpio(setting);
            for n in 1..=relay_count {
                let (port, bit) = pinmap::lookup(gpio.variant(), Channel::Relay(n)).unwrap();
                gpio.set_relay(n, true).unwrap();
                assert!(gpio.ports[port.index()].output(bit), "relay {} high", n);
                gpio.set_relay(n, false).unwrap();
                assert!(!gpio.ports[port.index()].output(bit), "relay {} low", n);
            }
        }
    }

    #[test]
    fn relay_writes_leave_other_bits_alone() {
        let gpio = fake_gpio(1);
        // Relays 13 and 5 share port D with the SWIM pin between them.
        gpio.set_relay(13, true).unwrap();
        gpio.set_relay(5, true).unwrap();
        let port_d = &gpio.ports[PortId::D.index()];
        assert_eq!(port_d.odr.get(), 0x05);
        gpio.set_relay(13, false).unwrap();
        assert_eq!(port_d.odr.get(), 0x04);
    }

    #[test]
    fn inputs_read_the_mapped_bit() {
        let gpio = fake_gpio(2);
        for n in 1..=8 {
            let (port, bit) = pinmap::lookup(gpio.variant(), Channel::Input(n)).unwrap();
            assert!(!gpio.read_input(n).unwrap());
            let fake = &gpio.ports[port.index()];
            fake.idr.set(fake.idr.get() | (1 << bit));
            assert!(gpio.read_input(n).unwrap(), "input {}", n);
        }
    }

    #[test]
    fn reset_button_reads_port_a_bit_one() {
        let gpio = fake_gpio(1);
        let port_a = &gpio.ports[PortId::A.index()];
        // Pulled up while released.
        port_a.idr.set(0x02);
        assert!(gpio.read_reset_button());
        // Pressed.
        port_a.idr.set(0x00);
        assert!(!gpio.read_reset_button());
    }

    #[test]
    fn link_primitives_hit_the_dedicated_pins() {
        let gpio = fake_gpio(3);
        let port_c = &gpio.ports[PortId::C.index()];
        let port_e = &gpio.ports[PortId::E.index()];

        gpio.set_spi_cs(true);
        assert_eq!(port_c.odr.get(), 0x02);
        gpio.set_spi_sck(true);
        assert_eq!(port_c.odr.get(), 0x06);
        gpio.set_spi_mosi(true);
        assert_eq!(port_c.odr.get(), 0x0E);
        gpio.set_spi_sck(false);
        assert_eq!(port_c.odr.get(), 0x0A);

        assert!(!gpio.read_spi_miso());
        port_c.idr.set(0x10);
        assert!(gpio.read_spi_miso());

        port_c.idr.set(0x30);
        assert!(gpio.read_ethernet_interrupt());

        gpio.set_ethernet_reset(true);
        assert_eq!(port_e.odr.get(), 0x20);
        gpio.set_ethernet_reset(false);
        assert_eq!(port_e.odr.get(), 0x00);
    }
}
