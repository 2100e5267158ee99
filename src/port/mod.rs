//! Processor port layer: the seam between the external kernel core and
//! this CPU.
//!
//! Three pieces make up the port: first-dispatch stack frames
//! ([`stack`]), the lifecycle hook entry points ([`hooks`]), and the
//! hardware tick ([`tick`]). Everything mutable they share lives in one
//! [`PortCtx`], carried by reference instead of floating as globals, so
//! the whole layer can run against mock kernels and fake registers.

pub mod hooks;
pub mod stack;
pub mod tick;

use core::ptr::NonNull;

use portable_atomic::{AtomicPtr, AtomicU16, Ordering};

use crate::kernel::{KernelCore, Tcb};
use hooks::AppHooks;

/// Mutable kernel-linkage state of the port.
///
/// Const-initialized exactly once; nothing here re-initializes behind
/// the kernel's back. The reload is written during tick bring-up and
/// read-only afterwards; the TCB slots track whatever the kernel last
/// reported and are only meaningful while a switch hook runs.
pub struct PortCtx {
    tick_reload: AtomicU16,
    tmr_ctr: AtomicU16,
    tcb_cur: AtomicPtr<Tcb>,
    tcb_next: AtomicPtr<Tcb>,
}

impl PortCtx {
    pub const fn new() -> Self {
        PortCtx {
            tick_reload: AtomicU16::new(0),
            tmr_ctr: AtomicU16::new(0),
            tcb_cur: AtomicPtr::new(core::ptr::null_mut()),
            tcb_next: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    /// Counter increment per tick period.
    pub fn tick_reload(&self) -> u16 {
        self.tick_reload.load(Ordering::Acquire)
    }

    pub(crate) fn set_tick_reload(&self, reload: u16) {
        self.tick_reload.store(reload, Ordering::Release);
    }

    pub(crate) fn tmr_ctr(&self) -> u16 {
        self.tmr_ctr.load(Ordering::Relaxed)
    }

    pub(crate) fn set_tmr_ctr(&self, value: u16) {
        self.tmr_ctr.store(value, Ordering::Relaxed);
    }

    /// Task the kernel last reported as running.
    pub fn current_task(&self) -> Option<NonNull<Tcb>> {
        NonNull::new(self.tcb_cur.load(Ordering::Acquire))
    }

    /// Task the kernel last reported as about to run.
    pub fn next_task(&self) -> Option<NonNull<Tcb>> {
        NonNull::new(self.tcb_next.load(Ordering::Acquire))
    }
}

impl Default for PortCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// The port: kernel seam, application hook binding, and context bundled
/// together so interrupt handlers and hooks get everything by reference.
///
/// `K` is the external kernel core; `H` fixes the application callbacks
/// at compile time (use [`hooks::NoAppHooks`] for none).
pub struct Port<K: KernelCore, H: AppHooks> {
    ctx: PortCtx,
    kernel: K,
    hooks: H,
}

impl<K: KernelCore, H: AppHooks> Port<K, H> {
    pub const fn new(kernel: K, hooks: H) -> Self {
        Port {
            ctx: PortCtx::new(),
            kernel,
            hooks,
        }
    }

    pub fn ctx(&self) -> &PortCtx {
        &self.ctx
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Kernel-side bookkeeping: record the task now holding the CPU.
    /// The switch hook reads this for the duration of the call only.
    pub fn set_current_task(&self, tcb: Option<NonNull<Tcb>>) {
        let ptr = tcb.map_or(core::ptr::null_mut(), NonNull::as_ptr);
        self.ctx.tcb_cur.store(ptr, Ordering::Release);
    }

    /// Kernel-side bookkeeping: record the task about to take the CPU.
    pub fn set_next_task(&self, tcb: Option<NonNull<Tcb>>) {
        let ptr = tcb.map_or(core::ptr::null_mut(), NonNull::as_ptr);
        self.ctx.tcb_next.store(ptr, Ordering::Release);
    }
}
