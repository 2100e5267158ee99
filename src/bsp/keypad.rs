//! 4x4 matrix keypad on port A.
//!
//! Rows drive out on PA4..PA7, columns read back on PA0..PA3 with the
//! port pull-ups engaged. A scan grounds one row at a time and looks
//! for a column pulled low. There is no debouncing here; callers poll
//! at tick rate, which is coarse enough to ride out contact bounce.

use crate::regs::{self, Reg8};

const PULL_UP_ENABLE: u8 = 0x01;

/// Legends of the sixteen keys, indexed by scan code.
pub const KEY_CHARS: [u8; 16] = *b"123A456B789C*0#D";

/// Printable legend for a scan code.
pub fn key_char(code: u8) -> u8 {
    KEY_CHARS[code as usize & 0x0F]
}

/// Where the keypad matrix is wired.
#[derive(Clone, Copy)]
pub struct KeypadPins {
    pub port: Reg8,
    pub ddr: Reg8,
    pub pull: Reg8,
    /// Bit in the pull-up register that covers this port.
    pub pull_mask: u8,
}

impl KeypadPins {
    /// The Dragon12 wiring: the whole matrix on port A.
    pub const fn board() -> Self {
        KeypadPins {
            port: regs::PORTA,
            ddr: regs::DDRA,
            pull: regs::PUCR,
            pull_mask: PULL_UP_ENABLE,
        }
    }
}

/// Handle to the keypad matrix. Construction configures the pins.
pub struct Keypad {
    pins: KeypadPins,
}

impl Keypad {
    /// Rows out, columns in with pull-ups.
    pub fn init(pins: KeypadPins) -> Self {
        pins.ddr.write(0xF0);
        pins.pull.set(pins.pull_mask);
        Keypad { pins }
    }

    /// One full scan. Returns the scan code `row * 4 + col` of the
    /// first key found held, or `None` when the matrix is idle. With
    /// more than one key down, the lowest-numbered one wins.
    pub fn scan(&self) -> Option<u8> {
        for row in 0..4u8 {
            self.pins.port.write(0xF0 & !(0x10 << row));
            let cols = self.pins.port.read() & 0x0F;
            if cols != 0x0F {
                for col in 0..4u8 {
                    if cols & (1 << col) == 0 {
                        return Some(row * 4 + col);
                    }
                }
            }
        }
        None
    }
}
