//! Character LCD (HD44780, 16x2) in 4-bit mode on port K.
//!
//! Wiring on this board: PK0 is register select, PK1 is the enable
//! strobe, PK2..PK5 carry the data nibble. Every byte goes out as two
//! strobed nibbles, high half first.
//!
//! The controller needs tens of microseconds after each transfer. The
//! driver paces itself with kernel delays, which rounds every wait up
//! to whole ticks: writes are slow, and other tasks run during them.

use crate::cfg;
use crate::kernel::KernelCore;
use crate::regs::{self, Reg8};

const RS: u8 = 0x01;
const EN: u8 = 0x02;

/// Visible columns per row.
pub const COLS: u8 = 16;
/// Visible rows.
pub const ROWS: u8 = 2;

const US_PER_TICK: u32 = 1_000_000 / cfg::TICKS_PER_SEC;

/// DDRAM address of a character cell. Row 1 starts at 0x40 regardless
/// of how many columns row 0 shows.
fn ddram_addr(row: u8, col: u8) -> u8 {
    debug_assert!(row < ROWS && col < COLS);
    if row == 0 { col } else { 0x40 + col }
}

/// Where the display is wired.
#[derive(Clone, Copy)]
pub struct LcdPins {
    pub port: Reg8,
    pub ddr: Reg8,
}

impl LcdPins {
    /// The Dragon12 wiring: the whole interface on port K.
    pub const fn board() -> Self {
        LcdPins {
            port: regs::PORTK,
            ddr: regs::DDRK,
        }
    }
}

/// The display, paced by kernel delays.
pub struct Lcd<'a, K: KernelCore> {
    kernel: &'a K,
    pins: LcdPins,
}

impl<'a, K: KernelCore> Lcd<'a, K> {
    /// Configure the pins and walk the controller through its 4-bit
    /// wake sequence. Leaves the display on, cleared, cursor hidden,
    /// auto-incrementing.
    pub fn init(kernel: &'a K, pins: LcdPins) -> Self {
        pins.ddr.write(0xFF);
        let lcd = Lcd { kernel, pins };

        // Reset-by-instruction: three 8-bit function sets, then the
        // switch to 4-bit. Timing per the controller's datasheet.
        lcd.dly_us(15_000);
        lcd.write_nibble(0x3, false);
        lcd.dly_us(4_100);
        lcd.write_nibble(0x3, false);
        lcd.dly_us(100);
        lcd.write_nibble(0x3, false);
        lcd.dly_us(100);
        lcd.write_nibble(0x2, false);

        lcd.command(0x28); // 4-bit, two lines, 5x8 font
        lcd.command(0x0C); // display on, cursor off
        lcd.clear();
        lcd.command(0x06); // increment, no shift
        lcd
    }

    /// Blank the display and home the cursor.
    pub fn clear(&self) {
        self.command(0x01);
        self.dly_us(2_000);
    }

    /// Move the cursor to `(row, col)`.
    pub fn set_cursor(&self, row: u8, col: u8) {
        self.command(0x80 | ddram_addr(row, col));
    }

    /// One character at the cursor; the cursor advances.
    pub fn write_char(&self, ch: u8) {
        self.send(ch, true);
    }

    /// A string at the cursor. The caller keeps it within the row.
    pub fn write_str(&self, s: &str) {
        for b in s.bytes() {
            self.write_char(b);
        }
    }

    /// Blank one row, leaving the other alone.
    pub fn clear_line(&self, row: u8) {
        self.write_line(row, "");
    }

    /// Replace an entire row: the text, then spaces out to the margin,
    /// so a shorter message fully covers a longer one.
    pub fn write_line(&self, row: u8, s: &str) {
        self.set_cursor(row, 0);
        let mut n = 0;
        for b in s.bytes().take(COLS as usize) {
            self.write_char(b);
            n += 1;
        }
        for _ in n..COLS {
            self.write_char(b' ');
        }
    }

    /// Raw controller command.
    pub fn command(&self, cmd: u8) {
        self.send(cmd, false);
    }

    fn send(&self, byte: u8, data: bool) {
        self.write_nibble(byte >> 4, data);
        self.write_nibble(byte & 0x0F, data);
    }

    fn write_nibble(&self, nib: u8, data: bool) {
        let mut v = (nib & 0x0F) << 2;
        if data {
            v |= RS;
        }
        // The falling edge of EN latches the nibble.
        self.pins.port.write(v | EN);
        self.dly_us(100);
        self.pins.port.write(v);
        self.dly_us(100);
    }

    /// Delay at least `us`. The extra tick covers the partial tick
    /// period already in flight when the delay starts.
    fn dly_us(&self, us: u32) {
        self.kernel.time_dly(us / US_PER_TICK + 1);
    }
}
