//! CRG clock bring-up: PLL engagement and timer prescaling.
//!
//! Out of reset the chip runs straight off the crystal. [`pll_init`]
//! multiplies that up and switches the system clock over; everything
//! else in the crate that needs a frequency reads it back from the CRG
//! with [`cpu_clk_hz`] / [`bus_clk_hz`] rather than trusting a compile
//! time constant, so a skipped or reconfigured PLL is handled for free.

use crate::cfg;
use crate::regs::{Crg, Ect, Reg8};

/// CRGFLG: PLL has locked onto the target frequency.
const CRGFLG_LOCK: u8 = 0x08;
/// CLKSEL: system clock comes from the PLL, not the crystal.
const CLKSEL_PLLSEL: u8 = 0x80;
/// BDMSTS: background-debug logic keeps its own clock across the switch.
const BDMSTS_CLKSW: u8 = 0x04;
/// PLLCTL: clock monitor on, PLL running.
const PLLCTL_CME_PLLON: u8 = 0xC0;

/// Spin the PLL up to `(osc * 2 * (PLL_MUL + 1)) / (PLL_DIV + 1)` and
/// make it the system clock.
///
/// Waits on the lock flag with no timeout: a dead crystal or a filter
/// fault parks the CPU in this loop, still reachable over BDM, instead
/// of running the rest of bring-up at an unknown frequency.
pub fn pll_init(crg: Crg, bdmsts: Reg8) {
    bdmsts.set(BDMSTS_CLKSW);

    // Deselect the PLL before retuning it.
    crg.clksel.write(0);
    crg.synr.write(cfg::PLL_MUL);
    crg.refdv.write(cfg::PLL_DIV);
    crg.pllctl.write(PLLCTL_CME_PLLON);

    while crg.crgflg.read() & CRGFLG_LOCK == 0 {}

    crg.clksel.set(CLKSEL_PLLSEL);
}

/// Core clock as currently selected: PLL output if engaged, otherwise
/// the raw crystal.
pub fn cpu_clk_hz(crg: Crg) -> u32 {
    if crg.clksel.read() & CLKSEL_PLLSEL != 0 {
        let mul = crg.synr.read() as u32 + 1;
        let div = crg.refdv.read() as u32 + 1;
        cfg::OSC_FREQ_HZ * 2 * mul / div
    } else {
        cfg::OSC_FREQ_HZ
    }
}

/// Peripheral bus clock: always half the core clock on this part.
pub fn bus_clk_hz(crg: Crg) -> u32 {
    cpu_clk_hz(crg) / 2
}

/// Set the free-running timer's prescaler to `divide` (a power of two
/// up to 128). Leaves the rest of TSCR2 alone.
pub fn set_ect_prescale(ect: Ect, divide: u16) {
    debug_assert!(divide.is_power_of_two() && divide <= 128);
    let bits = match divide {
        1 => 0,
        2 => 1,
        4 => 2,
        8 => 3,
        16 => 4,
        32 => 5,
        64 => 6,
        128 => 7,
        _ => 2,
    };
    ect.tscr2.write((ect.tscr2.read() & !0x07) | bits);
}
