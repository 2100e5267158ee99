//! The 10-bit A/D converter, block 0.
//!
//! Configured for free-running scans of one input: once started, the
//! converter refills its result registers continuously and readers just
//! take the latest word. That fits slow analog sources (potentiometer,
//! light sensor, IR ranger) where nobody wants conversion-complete
//! interrupts, only "the current value".

use crate::regs::AtdBlock;

const CTL2_ADPU: u8 = 0x80;
// Right-justified result, continuous scan, single channel.
const CTL5_DJM_SCAN: u8 = 0xA0;
// Conversion clock = bus / 12, inside the 2 MHz ceiling at 24 MHz.
const CTL4_PRESCALE: u8 = 0x05;

const RESULT_MASK: u16 = 0x03FF;

/// One A/D block in scan mode.
pub struct Atd {
    blk: AtdBlock,
}

impl Atd {
    pub const fn new(blk: AtdBlock) -> Self {
        Atd { blk }
    }

    /// Power the converter up and set conversion timing. The converter
    /// needs a short settle (tens of microseconds) before the first
    /// [`start`](Self::start).
    pub fn init(&self) {
        self.blk.ctl2.write(CTL2_ADPU);
        self.blk.ctl3.write(0x00);
        self.blk.ctl4.write(CTL4_PRESCALE);
    }

    /// Begin continuously converting input `ch` (0..=7). Any scan in
    /// progress is abandoned.
    pub fn start(&self, ch: u8) {
        debug_assert!(ch < 8);
        self.blk.ctl5.write(CTL5_DJM_SCAN | ch);
    }

    /// Latest conversion result, 0..=1023.
    pub fn read(&self) -> u16 {
        self.blk.dr(0).read() & RESULT_MASK
    }
}
