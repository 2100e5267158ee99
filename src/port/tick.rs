//! Kernel tick from an ECT output-compare channel.
//!
//! The tick rides the free-running 16-bit counter rather than a
//! dedicated periodic timer: each interrupt pushes the channel's compare
//! register forward by one tick's worth of counts. Because the next
//! deadline is computed from the previous compare value and not from
//! "now", interrupt latency never accumulates into drift; a late handler
//! just shortens the following interval.

use crate::kernel::KernelCore;
use crate::port::hooks::AppHooks;
use crate::port::Port;
use crate::regs::{Ect, OcChannel};

/// One output-compare channel driving the kernel tick.
pub struct TickSource {
    ect: Ect,
    ch: OcChannel,
}

impl TickSource {
    /// Bind the tick to channel `ch` of `ect`.
    pub const fn new(ect: Ect, ch: usize) -> Self {
        TickSource { ect, ch: ect.oc(ch) }
    }

    /// Program the channel for `ticks_per_sec` interrupts and start the
    /// counter. Returns the reload value (counts per tick minus one).
    ///
    /// The counts-per-tick figure comes from the live prescaler setting,
    /// so a clock layer that already configured the divider is honored
    /// as-is. The first compare is armed `reload` counts past the
    /// current counter value; every rearm after that runs at the full
    /// `reload + 1` period. The interval must land in `2..=65536`
    /// counts to be representable.
    pub fn init<K: KernelCore, H: AppHooks>(
        &self,
        port: &Port<K, H>,
        bus_clk_hz: u32,
        ticks_per_sec: u32,
    ) -> u16 {
        let counts = bus_clk_hz / self.ect.prescale_factor() / ticks_per_sec;
        debug_assert!((2..=0x1_0000).contains(&counts));
        let reload = (counts - 1) as u16;

        // Publish the reload before the first interrupt can fire.
        port.ctx().set_tick_reload(reload);

        self.ect.arm_oc(self.ch, reload);
        self.ect.enable_counter();
        crate::trace!("tick: {} Hz, reload {}", ticks_per_sec, reload);
        reload
    }

    /// Tick interrupt body. Call from the channel's interrupt vector.
    ///
    /// Acknowledges this channel only, schedules the next compare
    /// exactly `reload + 1` counts past the previous one, then reports
    /// exactly one elapsed tick to the kernel. When a deadline was
    /// missed badly enough that the new compare is already in the past,
    /// the flag sets again on exit and the handler re-enters once per
    /// missed interval, so each interrupt still maps to one tick.
    pub fn isr_handler<K: KernelCore, H: AppHooks>(&self, port: &Port<K, H>) {
        self.ect.clear_oc_flag(self.ch);
        // Stored value is counts-per-tick minus one; the wrapping add
        // makes the 65536-count interval come out as a whole counter
        // lap instead of overflowing.
        self.ect.advance_oc(self.ch, port.ctx().tick_reload().wrapping_add(1));
        port.kernel().time_tick();
    }
}
