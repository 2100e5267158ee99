//! The seam to the external kernel core.
//!
//! The scheduler is a closed black box linked in by the application. The
//! port and the drivers only ever touch it through the traits here; host
//! tests substitute mock implementations.

/// Task control block, owned and laid out by the kernel core.
///
/// The port receives TCB references in hooks and hands them straight
/// back to application callbacks; it never reads a field.
#[repr(C)]
pub struct Tcb {
    _private: [u8; 0],
}

/// Entry points the port and the drivers call into the kernel core.
pub trait KernelCore {
    /// Advance kernel time by one tick. The tick interrupt handler calls
    /// this exactly once per firing, after the hardware is rearmed.
    fn time_tick(&self);

    /// Wake the kernel's software-timer service. Driven from the tick
    /// hook at the configured tick-to-timer ratio.
    fn tmr_signal(&self);

    /// Block the calling task for `ticks` kernel ticks. Drivers use this
    /// for settling-time waits; never called from interrupt context.
    fn time_dly(&self, ticks: u32);
}

/// Blocking mutual exclusion supplied by the kernel core.
///
/// Drivers serialize multi-step access to shared display hardware with
/// one of these; the port layer itself never blocks.
pub trait KernelLock {
    /// Take the lock, blocking the calling task until it is free.
    fn acquire(&self);

    /// Release the lock, readying the highest-priority waiter.
    fn release(&self);
}
