//! Register-level access for the MC9S12DP256.
//!
//! The S12 family has no published peripheral access crate, so register
//! blocks are modeled directly: plain structs of typed register handles
//! laid out from a block base address, mirroring the on-chip map. The
//! running part's blocks are exposed as consts; tests lay the same
//! blocks over `#[repr(C)]` structs in ordinary memory and drive the
//! drivers against those.

use core::ptr;

// ============ Register handles ============

/// Handle to one 8-bit register.
#[derive(Clone, Copy)]
pub struct Reg8 {
    addr: *mut u8,
}

unsafe impl Send for Reg8 {}
unsafe impl Sync for Reg8 {}

impl Reg8 {
    /// Handle for the byte register at `addr`.
    ///
    /// # Safety
    /// Every read/write of the handle goes straight to `addr`; it must
    /// name a register of the running part, or writable memory standing
    /// in for one.
    #[inline(always)]
    pub const unsafe fn at(addr: usize) -> Self {
        Reg8 {
            addr: addr as *mut u8,
        }
    }

    #[inline(always)]
    pub fn read(self) -> u8 {
        unsafe { ptr::read_volatile(self.addr) }
    }

    #[inline(always)]
    pub fn write(self, value: u8) {
        unsafe { ptr::write_volatile(self.addr, value) }
    }

    #[inline(always)]
    pub fn set(self, mask: u8) {
        self.write(self.read() | mask);
    }

    #[inline(always)]
    pub fn clear(self, mask: u8) {
        self.write(self.read() & !mask);
    }

    #[inline(always)]
    pub fn toggle(self, mask: u8) {
        self.write(self.read() ^ mask);
    }
}

/// Handle to one 16-bit register, accessed as a single aligned word.
#[derive(Clone, Copy)]
pub struct Reg16 {
    addr: *mut u16,
}

unsafe impl Send for Reg16 {}
unsafe impl Sync for Reg16 {}

impl Reg16 {
    /// Handle for the word register at `addr` (must be even).
    ///
    /// # Safety
    /// Same contract as [`Reg8::at`].
    #[inline(always)]
    pub const unsafe fn at(addr: usize) -> Self {
        Reg16 {
            addr: addr as *mut u16,
        }
    }

    #[inline(always)]
    pub fn read(self) -> u16 {
        unsafe { ptr::read_volatile(self.addr) }
    }

    #[inline(always)]
    pub fn write(self, value: u16) {
        unsafe { ptr::write_volatile(self.addr, value) }
    }
}

// ============ Enhanced Capture Timer ============

/// One output-compare channel: the bit it owns in TIOS/TIE/TFLG1 and its
/// compare register.
#[derive(Clone, Copy)]
pub struct OcChannel {
    pub mask: u8,
    pub tc: Reg16,
}

/// Enhanced Capture Timer block.
#[derive(Clone, Copy)]
pub struct Ect {
    pub tios: Reg8,
    pub tcnt: Reg16,
    pub tscr1: Reg8,
    pub tie: Reg8,
    pub tscr2: Reg8,
    pub tflg1: Reg8,
    tc: [Reg16; 8],
}

/// TSCR1: counter enabled, halted in wait mode.
const TSCR1_RUN: u8 = 0xC0;

impl Ect {
    /// Lay the block out from `base` with the stock register offsets.
    ///
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        unsafe {
            Ect {
                tios: Reg8::at(base),
                tcnt: Reg16::at(base + 0x04),
                tscr1: Reg8::at(base + 0x06),
                tie: Reg8::at(base + 0x0C),
                tscr2: Reg8::at(base + 0x0D),
                tflg1: Reg8::at(base + 0x0E),
                tc: [
                    Reg16::at(base + 0x10),
                    Reg16::at(base + 0x12),
                    Reg16::at(base + 0x14),
                    Reg16::at(base + 0x16),
                    Reg16::at(base + 0x18),
                    Reg16::at(base + 0x1A),
                    Reg16::at(base + 0x1C),
                    Reg16::at(base + 0x1E),
                ],
            }
        }
    }

    /// Descriptor for output-compare channel `ch` (0..=7).
    pub const fn oc(self, ch: usize) -> OcChannel {
        assert!(ch < 8);
        OcChannel {
            mask: 1 << ch,
            tc: self.tc[ch],
        }
    }

    /// Divide ratio the counter is actually running at, read back from
    /// TSCR2 rather than assumed.
    pub fn prescale_factor(self) -> u32 {
        1u32 << (self.tscr2.read() & 0x07)
    }

    /// Put `ch` in output-compare mode, schedule its first match `delta`
    /// counts from now, and enable its interrupt.
    pub fn arm_oc(self, ch: OcChannel, delta: u16) {
        self.tios.set(ch.mask);
        ch.tc.write(self.tcnt.read().wrapping_add(delta));
        self.tie.set(ch.mask);
    }

    /// Move `ch`'s next match `delta` counts past the previous one.
    /// Relative to the old compare value, not to now, so handler entry
    /// latency never accumulates into the period.
    pub fn advance_oc(self, ch: OcChannel, delta: u16) {
        ch.tc.write(ch.tc.read().wrapping_add(delta));
    }

    /// Acknowledge `ch`'s pending interrupt. TFLG1 is write-1-to-clear:
    /// writing the bare mask leaves every other channel's flag alone,
    /// which a read-modify-write would not.
    pub fn clear_oc_flag(self, ch: OcChannel) {
        self.tflg1.write(ch.mask);
    }

    /// Start the free-running counter.
    pub fn enable_counter(self) {
        self.tscr1.write(TSCR1_RUN);
    }
}

// ============ Clock and Reset Generator ============

#[derive(Clone, Copy)]
pub struct Crg {
    pub synr: Reg8,
    pub refdv: Reg8,
    pub crgflg: Reg8,
    pub clksel: Reg8,
    pub pllctl: Reg8,
}

impl Crg {
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        unsafe {
            Crg {
                synr: Reg8::at(base),
                refdv: Reg8::at(base + 0x01),
                crgflg: Reg8::at(base + 0x03),
                clksel: Reg8::at(base + 0x05),
                pllctl: Reg8::at(base + 0x06),
            }
        }
    }
}

// ============ Non-volatile memory controllers ============

/// EEPROM controller registers.
#[derive(Clone, Copy)]
pub struct EeCtl {
    pub eclkdiv: Reg8,
    pub estat: Reg8,
    pub ecmd: Reg8,
}

impl EeCtl {
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        unsafe {
            EeCtl {
                eclkdiv: Reg8::at(base),
                estat: Reg8::at(base + 0x05),
                ecmd: Reg8::at(base + 0x06),
            }
        }
    }
}

/// Flash controller registers.
#[derive(Clone, Copy)]
pub struct FlashCtl {
    pub fclkdiv: Reg8,
    pub fcnfg: Reg8,
    pub fstat: Reg8,
    pub fcmd: Reg8,
}

impl FlashCtl {
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        unsafe {
            FlashCtl {
                fclkdiv: Reg8::at(base),
                fcnfg: Reg8::at(base + 0x03),
                fstat: Reg8::at(base + 0x05),
                fcmd: Reg8::at(base + 0x06),
            }
        }
    }
}

// ============ ATD converter ============

#[derive(Clone, Copy)]
pub struct AtdBlock {
    pub ctl2: Reg8,
    pub ctl3: Reg8,
    pub ctl4: Reg8,
    pub ctl5: Reg8,
    dr: [Reg16; 8],
}

impl AtdBlock {
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        unsafe {
            AtdBlock {
                ctl2: Reg8::at(base + 0x02),
                ctl3: Reg8::at(base + 0x03),
                ctl4: Reg8::at(base + 0x04),
                ctl5: Reg8::at(base + 0x05),
                dr: [
                    Reg16::at(base + 0x10),
                    Reg16::at(base + 0x12),
                    Reg16::at(base + 0x14),
                    Reg16::at(base + 0x16),
                    Reg16::at(base + 0x18),
                    Reg16::at(base + 0x1A),
                    Reg16::at(base + 0x1C),
                    Reg16::at(base + 0x1E),
                ],
            }
        }
    }

    /// Result register for channel `ch` (0..=7).
    pub const fn dr(self, ch: usize) -> Reg16 {
        assert!(ch < 8);
        self.dr[ch]
    }
}

// ============ PWM ============

#[derive(Clone, Copy)]
pub struct PwmBlock {
    pub pwme: Reg8,
    pub pwmpol: Reg8,
    pub pwmclk: Reg8,
    pub pwmprclk: Reg8,
    pub pwmcae: Reg8,
    pub pwmctl: Reg8,
    pub pwmscla: Reg8,
    cnt: [Reg8; 8],
    per: [Reg8; 8],
    dty: [Reg8; 8],
}

impl PwmBlock {
    /// # Safety
    /// Same contract as [`Reg8::at`], for the whole block.
    pub const unsafe fn from_base(base: usize) -> Self {
        const fn bank(base: usize, off: usize) -> [Reg8; 8] {
            unsafe {
                [
                    Reg8::at(base + off),
                    Reg8::at(base + off + 1),
                    Reg8::at(base + off + 2),
                    Reg8::at(base + off + 3),
                    Reg8::at(base + off + 4),
                    Reg8::at(base + off + 5),
                    Reg8::at(base + off + 6),
                    Reg8::at(base + off + 7),
                ]
            }
        }
        unsafe {
            PwmBlock {
                pwme: Reg8::at(base),
                pwmpol: Reg8::at(base + 0x01),
                pwmclk: Reg8::at(base + 0x02),
                pwmprclk: Reg8::at(base + 0x03),
                pwmcae: Reg8::at(base + 0x04),
                pwmctl: Reg8::at(base + 0x05),
                pwmscla: Reg8::at(base + 0x08),
                cnt: bank(base, 0x0C),
                per: bank(base, 0x14),
                dty: bank(base, 0x1C),
            }
        }
    }

    pub const fn cnt(self, ch: usize) -> Reg8 {
        assert!(ch < 8);
        self.cnt[ch]
    }

    pub const fn per(self, ch: usize) -> Reg8 {
        assert!(ch < 8);
        self.per[ch]
    }

    pub const fn dty(self, ch: usize) -> Reg8 {
        assert!(ch < 8);
        self.dty[ch]
    }
}

// ============ MC9S12DP256 instances ============

pub const PORTA: Reg8 = unsafe { Reg8::at(0x0000) };
pub const PORTB: Reg8 = unsafe { Reg8::at(0x0001) };
pub const DDRA: Reg8 = unsafe { Reg8::at(0x0002) };
pub const DDRB: Reg8 = unsafe { Reg8::at(0x0003) };
pub const PUCR: Reg8 = unsafe { Reg8::at(0x000C) };
pub const PPAGE: Reg8 = unsafe { Reg8::at(0x0030) };
pub const PORTK: Reg8 = unsafe { Reg8::at(0x0032) };
pub const DDRK: Reg8 = unsafe { Reg8::at(0x0033) };
pub const PTP: Reg8 = unsafe { Reg8::at(0x0258) };
pub const DDRP: Reg8 = unsafe { Reg8::at(0x025A) };
pub const PTJ: Reg8 = unsafe { Reg8::at(0x0268) };
pub const DDRJ: Reg8 = unsafe { Reg8::at(0x026A) };

/// BDM status; the CLKSW bit keeps the debug monitor's serial link alive
/// across the PLL switch.
pub const BDMSTS: Reg8 = unsafe { Reg8::at(0xFF01) };

pub const CRG: Crg = unsafe { Crg::from_base(0x0034) };
pub const ECT: Ect = unsafe { Ect::from_base(0x0040) };
pub const ATD0: AtdBlock = unsafe { AtdBlock::from_base(0x0080) };
pub const PWM: PwmBlock = unsafe { PwmBlock::from_base(0x00A0) };
pub const FLASH_CTL: FlashCtl = unsafe { FlashCtl::from_base(0x0100) };
pub const EE_CTL: EeCtl = unsafe { EeCtl::from_base(0x0110) };
