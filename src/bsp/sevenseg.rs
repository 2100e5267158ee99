//! Four-digit seven-segment display, multiplexed from a timer channel.
//!
//! The four digits share segment lines on port B; digit selects sit on
//! the low nibble of port P, active low. Only one digit is ever lit:
//! an output-compare interrupt steps through them fast enough that the
//! eye sees all four. The scan runs on its own timer channel so its
//! rate is independent of the kernel tick. Each step also gates the
//! discrete LED bank off, since the bank shares port B with the
//! segment lines.

use portable_atomic::{AtomicU16, Ordering};

use crate::critical::{with_masked, CsCell};
use crate::kernel::KernelLock;
use crate::regs::{self, Ect, OcChannel, Reg8};

/// Largest value the four digits can show; [`SevenSeg::set`] ignores
/// anything larger.
pub const MAX: u16 = 9999;

/// Segment patterns for 0..=F, bit 0 = segment a through bit 6 = g.
pub const PATTERNS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07,
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

const DIGIT_SEL: u8 = 0x0F;
const LED_GATE: u8 = 0x02;

const fn pow10(pos: u8) -> u16 {
    match pos {
        0 => 1,
        1 => 10,
        2 => 100,
        _ => 1000,
    }
}

fn digit_of(value: u16, pos: u8) -> u8 {
    ((value / pow10(pos)) % 10) as u8
}

/// Where the display is wired.
#[derive(Clone, Copy)]
pub struct SegPins {
    pub seg_port: Reg8,
    pub seg_ddr: Reg8,
    pub sel_port: Reg8,
    pub sel_ddr: Reg8,
    /// Gate for the LED bank that shares the segment port; the scan
    /// raises it to keep the bank dark.
    pub led_gate: Reg8,
}

impl SegPins {
    /// The Dragon12 wiring: segments on port B, digit selects on the
    /// low nibble of port P, LED gate on port J.
    pub const fn board() -> Self {
        SegPins {
            seg_port: regs::PORTB,
            seg_ddr: regs::DDRB,
            sel_port: regs::PTP,
            sel_ddr: regs::DDRP,
            led_gate: regs::PTJ,
        }
    }
}

/// The multiplexed display. Lives in a `static` so the scan interrupt
/// can reach it; tasks talk to it through [`set`](SevenSeg::set).
pub struct SevenSeg {
    ect: Ect,
    ch: OcChannel,
    pins: SegPins,
    reload: AtomicU16,
    value: CsCell<u16>,
    digit: CsCell<u8>,
}

impl SevenSeg {
    /// Bind the display scan to channel `ch` of `ect`.
    pub const fn new(ect: Ect, ch: usize, pins: SegPins) -> Self {
        SevenSeg {
            ect,
            ch: ect.oc(ch),
            pins,
            reload: AtomicU16::new(0),
            value: CsCell::new(0),
            digit: CsCell::new(0),
        }
    }

    /// Configure the pins, program the scan channel for
    /// `scans_per_sec` digit steps, and start with all digits blank.
    ///
    /// Each interrupt advances one digit, so the full display refreshes
    /// at a quarter of the scan rate. The interval shares the
    /// free-running counter's prescaler with the kernel tick and must
    /// land in `2..=65536` counts.
    pub fn init(&self, bus_clk_hz: u32, scans_per_sec: u32) {
        self.pins.seg_ddr.write(0xFF);
        self.pins.sel_ddr.set(DIGIT_SEL);
        self.pins.sel_port.set(DIGIT_SEL);

        let counts = bus_clk_hz / self.ect.prescale_factor() / scans_per_sec;
        debug_assert!((2..=0x1_0000).contains(&counts));
        let reload = (counts - 1) as u16;
        self.reload.store(reload, Ordering::Release);

        self.ect.arm_oc(self.ch, reload);
        self.ect.enable_counter();
    }

    /// Show `value`. Takes effect on the next digit step.
    ///
    /// Values above [`MAX`] do not fit in four digits and are ignored;
    /// the display keeps showing what it had.
    pub fn set(&self, value: u16) {
        if value > MAX {
            return;
        }
        with_masked(|m| self.value.set(m, value));
    }

    /// Scan interrupt body. Call from the channel's interrupt vector.
    ///
    /// Steps to the next digit: blanks the selects, gates the LED bank
    /// off, puts that digit's segment pattern on port B, then grounds
    /// its select line.
    pub fn isr_handler(&self) {
        self.ect.clear_oc_flag(self.ch);
        self.ect.advance_oc(self.ch, self.reload.load(Ordering::Acquire).wrapping_add(1));

        // Sole accessor of the scan position; value writers hold the
        // interrupt mask, so neither read can interleave with a store.
        let digit = unsafe { self.digit.get_mut_unchecked() };
        *digit = (*digit + 1) & 0x03;
        let value = unsafe { *self.value.get_mut_unchecked() };

        self.pins.sel_port.set(DIGIT_SEL);
        self.pins.led_gate.set(LED_GATE);
        self.pins.seg_port.write(PATTERNS[digit_of(value, *digit) as usize]);
        self.pins.sel_port.clear(1 << *digit);
    }
}

/// Display updates behind a kernel lock.
///
/// [`SevenSeg::set`] already masks interrupts for the store itself; the
/// lock adds task-level ownership on top, keeping a sequence of updates
/// from one task from interleaving with another's.
pub struct LockedSevenSeg<'a, L: KernelLock> {
    seg: &'a SevenSeg,
    lock: &'a L,
}

impl<'a, L: KernelLock> LockedSevenSeg<'a, L> {
    pub const fn new(seg: &'a SevenSeg, lock: &'a L) -> Self {
        LockedSevenSeg { seg, lock }
    }

    pub fn set(&self, value: u16) {
        self.lock.acquire();
        self.seg.set(value);
        self.lock.release();
    }
}
