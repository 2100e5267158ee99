//! On-chip nonvolatile memory: the 4K EEPROM block and the paged flash.
//!
//! Both controllers share the same command protocol: set the clock
//! divider once, then per operation write the aligned data word, the
//! command code, and the launch bit, and poll for completion. Flash
//! adds page bookkeeping on top, since its 16K window at 0x8000 shows
//! one PPAGE-selected page at a time and commands must be steered to
//! the block that owns that page.

use crate::regs::{EeCtl, FlashCtl, Reg8};

// Status bits, common to ESTAT and FSTAT.
const CBEIF: u8 = 0x80;
const CCIF: u8 = 0x40;
const PVIOL: u8 = 0x20;
const ACCERR: u8 = 0x10;

// Clock divider register.
const DIVLD: u8 = 0x80;
const PRDIV8: u8 = 0x40;

// Command codes.
const CMD_PROGRAM: u8 = 0x20;
const CMD_SECTOR_ERASE: u8 = 0x40;
const CMD_MASS_ERASE: u8 = 0x41;

/// A programming or erase command that did not complete. Discriminants
/// are the driver's negative status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum NvmError {
    /// Word operations need an even address.
    OddAddress = -1,
    /// Controller access error: bad sequence or out-of-array address.
    Access = -2,
    /// The target sector is protected.
    Protection = -3,
}

/// Divider that brings `osc_khz` down to the controller's 200 kHz
/// programming clock. The clock runs at `osc / (div + 1)`, through a
/// fixed extra /8 stage above 12 MHz.
pub fn clk_divider(osc_khz: u32) -> u8 {
    if osc_khz >= 12_000 {
        PRDIV8 | (osc_khz / 8 / 200 - 1) as u8
    } else {
        (osc_khz / 200 - 1) as u8
    }
}

/// One command round on a controller's status/command register pair.
///
/// # Safety
/// `addr` must be an even address inside the controller's array, with
/// any page window already set up by the caller.
unsafe fn run_cmd(stat: Reg8, cmd_reg: Reg8, addr: u16, value: u16, cmd: u8) -> Result<(), NvmError> {
    if addr & 1 != 0 {
        return Err(NvmError::OddAddress);
    }

    // Stale error flags block command launch; both are write-one-to-clear.
    stat.write(PVIOL | ACCERR);
    while stat.read() & CBEIF == 0 {}

    unsafe { (addr as usize as *mut u16).write_volatile(value) };
    cmd_reg.write(cmd);
    stat.write(CBEIF);

    let st = stat.read();
    if st & ACCERR != 0 {
        return Err(NvmError::Access);
    }
    if st & PVIOL != 0 {
        return Err(NvmError::Protection);
    }

    while stat.read() & CCIF == 0 {}
    Ok(())
}

// ============ EEPROM ============

/// The 4K EEPROM array. Word-programmable, 4-byte erase sectors.
///
/// The first 1K of its reset-default address range is shadowed by the
/// register block; usable data addresses start at 0x0400 unless the
/// array has been remapped.
pub struct Eeprom {
    ctl: EeCtl,
}

impl Eeprom {
    pub const fn new(ctl: EeCtl) -> Self {
        Eeprom { ctl }
    }

    /// Set the programming clock from the oscillator frequency. Skipped
    /// when a divider is already loaded; the controller latches the
    /// first write until reset.
    pub fn init(&self, osc_khz: u32) {
        if self.ctl.eclkdiv.read() & DIVLD == 0 {
            self.ctl.eclkdiv.write(clk_divider(osc_khz));
            crate::debug!("eeprom clock set for {} kHz osc", osc_khz);
        }
    }

    /// Program one word. The target must be erased.
    ///
    /// # Safety
    /// `addr` must lie in the EEPROM array and hold no live data the
    /// rest of the program is using.
    pub unsafe fn write_word(&self, addr: u16, value: u16) -> Result<(), NvmError> {
        unsafe { run_cmd(self.ctl.estat, self.ctl.ecmd, addr, value, CMD_PROGRAM) }
    }

    /// Erase the 4-byte sector containing `addr`.
    ///
    /// # Safety
    /// Same contract as [`write_word`](Self::write_word).
    pub unsafe fn erase_sector(&self, addr: u16) -> Result<(), NvmError> {
        unsafe { run_cmd(self.ctl.estat, self.ctl.ecmd, addr & !3, 0xFFFF, CMD_SECTOR_ERASE) }
    }

    /// Erase the whole array.
    ///
    /// # Safety
    /// Destroys every byte of EEPROM, including any calibration or
    /// configuration data other code expects to find there.
    pub unsafe fn erase_all(&self, base: u16) -> Result<(), NvmError> {
        unsafe { run_cmd(self.ctl.estat, self.ctl.ecmd, base, 0xFFFF, CMD_MASS_ERASE) }
    }

    /// Controller will accept a command: CBEIF set in ESTAT.
    pub fn ready(&self) -> bool {
        self.ctl.estat.read() & CBEIF != 0
    }

    /// Read one word back. Blocks until the command buffer drains, so
    /// an in-flight program or erase finishes first.
    ///
    /// # Safety
    /// `addr` must be an even address inside the EEPROM array, and no
    /// other task may launch commands on this controller while the
    /// read runs.
    pub unsafe fn read_word(&self, addr: u16) -> u16 {
        while !self.ready() {}
        unsafe { (addr as usize as *const u16).read_volatile() }
    }
}

// ============ Flash ============

/// The paged program flash, seen through the 16K window at 0x8000.
/// Word-programmable, 512-byte erase sectors.
pub struct Flash {
    ctl: FlashCtl,
    ppage: Reg8,
}

impl Flash {
    pub const fn new(ctl: FlashCtl, ppage: Reg8) -> Self {
        Flash { ctl, ppage }
    }

    /// Set the programming clock from the oscillator frequency, once.
    pub fn init(&self, osc_khz: u32) {
        if self.ctl.fclkdiv.read() & DIVLD == 0 {
            self.ctl.fclkdiv.write(clk_divider(osc_khz));
            crate::debug!("flash clock set for {} kHz osc", osc_khz);
        }
    }

    /// Program one word at `addr` within `page`'s window.
    ///
    /// # Safety
    /// `page` must be a valid flash page and `addr` inside the 0x8000
    /// window; the block owning that page must not be the one the CPU
    /// is currently executing from.
    pub unsafe fn write_word(&self, page: u8, addr: u16, value: u16) -> Result<(), NvmError> {
        unsafe { self.paged(page, addr, value, CMD_PROGRAM) }
    }

    /// Erase the 512-byte sector containing `addr` within `page`.
    ///
    /// # Safety
    /// Same contract as [`write_word`](Self::write_word).
    pub unsafe fn erase_sector(&self, page: u8, addr: u16) -> Result<(), NvmError> {
        unsafe { self.paged(page, addr & !0x01FF, 0xFFFF, CMD_SECTOR_ERASE) }
    }

    /// No command in flight: CCIF set in FSTAT.
    pub fn ready(&self) -> bool {
        self.ctl.fstat.read() & CCIF != 0
    }

    /// Read one word from `page`'s window. Blocks until any in-flight
    /// command completes.
    ///
    /// # Safety
    /// `page` must be a valid flash page and `addr` an even address
    /// inside the 0x8000 window; no other task may launch commands on
    /// this controller while the read runs.
    pub unsafe fn read_word(&self, page: u8, addr: u16) -> u16 {
        let saved = self.ppage.read();
        self.ppage.write(page);
        while !self.ready() {}
        let v = unsafe { (addr as usize as *const u16).read_volatile() };
        self.ppage.write(saved);
        v
    }

    /// # Safety
    /// See [`write_word`](Self::write_word).
    unsafe fn paged(&self, page: u8, addr: u16, value: u16, cmd: u8) -> Result<(), NvmError> {
        let saved = self.ppage.read();
        self.ppage.write(page);
        // Steer the command to the block that owns this page.
        self.ctl.fcnfg.write((!page & 0x0C) >> 2);
        let r = unsafe { run_cmd(self.ctl.fstat, self.ctl.fcmd, addr, value, cmd) };
        self.ppage.write(saved);
        r
    }
}
