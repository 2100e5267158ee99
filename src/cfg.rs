//! Build-time board and port configuration.
//!
//! Everything here is fixed at compile time. Invalid combinations fail
//! the build through the assertions at the bottom; nothing in this table
//! is range-checked again at runtime.

use crate::port::stack::{MemModel, StkGrowth, FRAME_BANKED};

/// On-board crystal, Hz.
pub const OSC_FREQ_HZ: u32 = 8_000_000;

/// Run the system clock off the PLL.
pub const PLL_EN: bool = true;
/// PLL synthesizer multiplier (SYNR value), 0..=63.
pub const PLL_MUL: u8 = 2;
/// PLL reference divider (REFDV value), 0..=15.
pub const PLL_DIV: u8 = 0;

/// CPU clock this configuration produces:
/// `osc × 2 × (mul + 1) / (div + 1)` when the PLL is selected.
pub const CPU_CLK_HZ: u32 = if PLL_EN {
    (OSC_FREQ_HZ * 2) * (PLL_MUL as u32 + 1) / (PLL_DIV as u32 + 1)
} else {
    OSC_FREQ_HZ
};

/// Bus (E) clock: half the CPU clock on this family.
pub const BUS_CLK_HZ: u32 = CPU_CLK_HZ / 2;

/// ECT prescale divide ratio programmed at bring-up. At the full PLL bus
/// clock, ratios under 4 push the tick period past 16 bits of counter.
pub const ECT_PRESCALE: u16 = 4;

/// Output-compare channel that generates the kernel tick.
pub const TICK_OC_CH: usize = 7;
/// Kernel ticks per second.
pub const TICKS_PER_SEC: u32 = 200;

/// Software-timer service expirations per second.
pub const TMR_TICKS_PER_SEC: u32 = 10;
/// Tick-hook countdown period: kernel ticks per timer-service signal.
pub const TMR_TICK_RATIO: u16 = (TICKS_PER_SEC / TMR_TICKS_PER_SEC) as u16;

/// Output-compare channel that refreshes the 7-segment display.
pub const SEG_OC_CH: usize = 6;
/// 7-segment digit refreshes per second.
pub const SEG_SCANS_PER_SEC: u32 = 225;

/// Code addressing model task entry points use.
pub const MEM_MODEL: MemModel = MemModel::Banked;
/// Stack growth direction.
pub const STK_GROWTH: StkGrowth = StkGrowth::Descending;

/// Smallest stack region worth creating a task over, bytes.
pub const STK_SIZE_MIN: usize = 64;

// ============ Static range checks ============

const _: () = assert!(
    TICK_OC_CH < 8,
    "tick channel must be one of the eight output-compare channels"
);
const _: () = assert!(
    SEG_OC_CH < 8 && SEG_OC_CH != TICK_OC_CH,
    "display refresh needs its own output-compare channel"
);
const _: () = assert!(PLL_MUL <= 63, "SYNR holds six bits");
const _: () = assert!(PLL_DIV <= 15, "REFDV holds four bits");
const _: () = assert!(
    BUS_CLK_HZ <= 25_000_000,
    "bus clock beyond the rated maximum for this part"
);
const _: () = assert!(
    TMR_TICKS_PER_SEC >= 1 && TMR_TICKS_PER_SEC <= TICKS_PER_SEC,
    "the software-timer service cannot outrun the tick"
);

// Both compare channels must fit their period in 16-bit counter math.
const TICK_COUNTS: u32 = BUS_CLK_HZ / (ECT_PRESCALE as u32 * TICKS_PER_SEC);
const _: () = assert!(
    TICK_COUNTS >= 2 && TICK_COUNTS <= 0x1_0000,
    "tick period unrepresentable at this bus clock and prescale"
);
const SEG_COUNTS: u32 = BUS_CLK_HZ / (ECT_PRESCALE as u32 * SEG_SCANS_PER_SEC);
const _: () = assert!(
    SEG_COUNTS >= 2 && SEG_COUNTS <= 0x1_0000,
    "display refresh period unrepresentable at this bus clock and prescale"
);

const _: () = assert!(
    matches!(STK_GROWTH, StkGrowth::Descending),
    "the S12 interrupt stacking only supports descending stacks"
);
const _: () = assert!(
    STK_SIZE_MIN >= FRAME_BANKED,
    "minimum stack cannot be smaller than a first-dispatch frame"
);
