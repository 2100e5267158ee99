//! The eight discrete LEDs on port B.
//!
//! Port B is shared with the seven-segment display's segment lines; the
//! transistor feeding the LED bank is gated by port J pin 1, active low.
//! The display scan raises that gate at every digit step, so while the
//! scan runs the bank stays dark regardless of what is written here.

use crate::regs::{self, Reg8};

const LED_ENABLE: u8 = 0x02;

/// Where the LED bank is wired.
#[derive(Clone, Copy)]
pub struct LedPins {
    pub port: Reg8,
    pub ddr: Reg8,
    pub gate_port: Reg8,
    pub gate_ddr: Reg8,
}

impl LedPins {
    /// The Dragon12 wiring: data on port B, gate on port J pin 1.
    pub const fn board() -> Self {
        LedPins {
            port: regs::PORTB,
            ddr: regs::DDRB,
            gate_port: regs::PTJ,
            gate_ddr: regs::DDRJ,
        }
    }
}

/// Handle to the LED bank. Construction configures the pins.
pub struct Leds {
    pins: LedPins,
}

impl Leds {
    /// Make the data port an output, ungate the LED drivers, all LEDs
    /// off.
    pub fn init(pins: LedPins) -> Self {
        pins.ddr.write(0xFF);
        pins.gate_ddr.set(LED_ENABLE);
        pins.gate_port.clear(LED_ENABLE);
        pins.port.write(0x00);
        Leds { pins }
    }

    /// Set all eight LEDs at once, one bit per LED.
    pub fn write(&self, bits: u8) {
        self.pins.port.write(bits);
    }

    pub fn on(&self, n: u8) {
        debug_assert!(n < 8);
        self.pins.port.set(1 << n);
    }

    pub fn off(&self, n: u8) {
        debug_assert!(n < 8);
        self.pins.port.clear(1 << n);
    }

    pub fn toggle(&self, n: u8) {
        debug_assert!(n < 8);
        self.pins.port.toggle(1 << n);
    }
}
