//! Application hook points.
//!
//! The kernel calls out at fixed moments in its lifecycle; this module
//! turns those call-outs into a trait the application implements once
//! and binds into [`Port`](super::Port) as a type parameter. Every
//! method defaults to a no-op, so an application opts into exactly the
//! hooks it cares about and the rest compile away.
//!
//! One hook carries port-side work of its own: the tick hook divides the
//! kernel tick down to the software-timer rate and signals the timer
//! service each time the divider wraps. That runs whether or not the
//! application installs anything.

use core::ptr::NonNull;

use crate::cfg;
use crate::kernel::{KernelCore, Tcb};
use crate::port::Port;

/// Application call-outs from kernel lifecycle events.
///
/// Implementations must tolerate interrupt context: the switch, tick and
/// statistics hooks run with the scheduler locked or inside the tick
/// interrupt, so they must not block or take kernel waits.
pub trait AppHooks {
    /// Start of kernel initialization, before any kernel object exists.
    fn on_init_begin(&self) {}

    /// End of kernel initialization, still before the first task runs.
    fn on_init_end(&self) {}

    /// A task was created; its control block is fully formed.
    fn on_task_create(&self, _tcb: NonNull<Tcb>) {}

    /// A task is being deleted; the control block is still valid here.
    fn on_task_delete(&self, _tcb: NonNull<Tcb>) {}

    /// A control block was initialized, before the task becomes ready.
    fn on_tcb_init(&self, _tcb: NonNull<Tcb>) {}

    /// A context switch is about to commit. Runs on the outgoing task's
    /// stack with interrupts masked.
    fn on_task_switch(&self, _cur: Option<NonNull<Tcb>>, _next: Option<NonNull<Tcb>>) {}

    /// The idle task found nothing to run. A natural place to sleep the
    /// CPU; must not wait on kernel objects.
    fn on_idle(&self) {}

    /// Statistics task interval. Runs in task context.
    fn on_stat(&self) {}

    /// Every kernel tick, from the tick interrupt.
    fn on_tick(&self) {}
}

/// The empty hook set. Binding this into a port erases every hook call.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoAppHooks;

impl AppHooks for NoAppHooks {}

impl<K: KernelCore, H: AppHooks> Port<K, H> {
    /// Kernel initialization is starting.
    ///
    /// Resets the timer-tick divider so a kernel restart begins a fresh
    /// division interval instead of inheriting a partial one.
    pub fn init_hook_begin(&self) {
        self.ctx().set_tmr_ctr(0);
        self.hooks().on_init_begin();
    }

    /// Kernel initialization finished.
    pub fn init_hook_end(&self) {
        self.hooks().on_init_end();
    }

    /// A task was created.
    pub fn task_create_hook(&self, tcb: NonNull<Tcb>) {
        self.hooks().on_task_create(tcb);
    }

    /// A task is being deleted.
    pub fn task_delete_hook(&self, tcb: NonNull<Tcb>) {
        self.hooks().on_task_delete(tcb);
    }

    /// A task control block was initialized.
    pub fn tcb_init_hook(&self, tcb: NonNull<Tcb>) {
        self.hooks().on_tcb_init(tcb);
    }

    /// A context switch is committing. Passes the outgoing and incoming
    /// control blocks as published in the port context.
    pub fn task_switch_hook(&self) {
        let ctx = self.ctx();
        self.hooks().on_task_switch(ctx.current_task(), ctx.next_task());
    }

    /// The idle task is spinning.
    pub fn idle_hook(&self) {
        self.hooks().on_idle();
    }

    /// The statistics task ran an interval.
    pub fn stat_hook(&self) {
        self.hooks().on_stat();
    }

    /// A kernel tick elapsed.
    ///
    /// Forwards to the application first, then runs the timer divider:
    /// after [`cfg::TMR_TICK_RATIO`] ticks it signals the kernel's
    /// software-timer service and starts the interval over.
    pub fn time_tick_hook(&self) {
        self.hooks().on_tick();

        let ctx = self.ctx();
        let ctr = ctx.tmr_ctr() + 1;
        if ctr >= cfg::TMR_TICK_RATIO {
            ctx.set_tmr_ctr(0);
            self.kernel().tmr_signal();
        } else {
            ctx.set_tmr_ctr(ctr);
        }
    }
}
