//! Board support for the Dragon12 evaluation board (MC9S12DP256).
//!
//! [`init`] performs the board-wide bring-up an application always
//! needs: clocks and the kernel tick. The individual peripherals (LCD,
//! keypad, seven-segment display, A/D, speaker, nonvolatile memory)
//! each carry their own driver module and are initialized by the
//! application as it uses them.

pub mod atd;
pub mod clock;
pub mod keypad;
pub mod lcd;
pub mod led;
pub mod nvm;
pub mod pwm;
pub mod sevenseg;

use crate::cfg;
use crate::kernel::KernelCore;
use crate::port::hooks::AppHooks;
use crate::port::tick::TickSource;
use crate::port::Port;
use crate::regs;

/// Board-wide bring-up: engage the PLL (when configured), prescale the
/// timer, start the kernel tick, and ready the LED bank.
///
/// Call once, after the kernel is initialized and before it starts
/// scheduling. The tick rate is taken from [`cfg`]; the bus frequency
/// feeding it is read back from the CRG, so the tick stays honest even
/// when the PLL is configured out.
pub fn init<K: KernelCore, H: AppHooks>(port: &Port<K, H>, tick: &TickSource) {
    if cfg::PLL_EN {
        clock::pll_init(regs::CRG, regs::BDMSTS);
    }
    clock::set_ect_prescale(regs::ECT, cfg::ECT_PRESCALE);

    let bus = clock::bus_clk_hz(regs::CRG);
    tick.init(port, bus, cfg::TICKS_PER_SEC);

    led::Leds::init(led::LedPins::board());

    crate::info!("board up: bus {} Hz", bus);
}

/// Block the calling task for `ms` milliseconds, rounded up to whole
/// kernel ticks. Zero returns immediately; anything else delays at
/// least one tick.
pub fn dly_ms<K: KernelCore>(kernel: &K, ms: u32) {
    if ms == 0 {
        return;
    }
    let ticks = ((ms as u64 * cfg::TICKS_PER_SEC as u64 + 999) / 1000) as u32;
    kernel.time_dly(ticks);
}
