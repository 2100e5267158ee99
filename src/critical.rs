//! Interrupt masking primitives.
//!
//! The port and the drivers never toggle interrupts directly; they hold
//! an [`IntMask`] guard, which remembers the mask state it found and puts
//! it back when dropped, so nested sections are safe on every exit path.

use core::cell::UnsafeCell;

use critical_section::RestoreState;

/// RAII interrupt-mask guard.
///
/// Maskable interrupts are off from `acquire` until the guard drops;
/// dropping restores whatever state the guard found, so an already-masked
/// caller stays masked.
pub struct IntMask {
    restore: RestoreState,
}

impl IntMask {
    /// Mask maskable interrupts, remembering the prior state.
    #[inline(always)]
    pub fn acquire() -> Self {
        IntMask {
            restore: unsafe { critical_section::acquire() },
        }
    }
}

impl Drop for IntMask {
    #[inline(always)]
    fn drop(&mut self) {
        // Guards drop innermost-first, which is exactly the pairing the
        // underlying acquire/release protocol requires.
        unsafe { critical_section::release(self.restore) }
    }
}

/// Run `f` with maskable interrupts off; the prior mask state is
/// restored when `f` returns.
#[inline]
pub fn with_masked<F, R>(f: F) -> R
where
    F: FnOnce(&IntMask) -> R,
{
    let mask = IntMask::acquire();
    f(&mask)
}

/// A cell readable and writable only under an interrupt mask.
///
/// Writers in task context prove masking by presenting an [`IntMask`];
/// interrupt handlers, which enter with interrupts already masked by the
/// hardware, use the unchecked accessor.
pub struct CsCell<T>(UnsafeCell<T>);

unsafe impl<T: Send> Sync for CsCell<T> {}

impl<T> CsCell<T> {
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    /// Replace the value.
    #[inline(always)]
    pub fn set(&self, _mask: &IntMask, value: T) {
        unsafe { *self.0.get() = value }
    }

    /// Read the value out.
    #[inline(always)]
    pub fn get(&self, _mask: &IntMask) -> T
    where
        T: Copy,
    {
        unsafe { *self.0.get() }
    }

    /// Access without an [`IntMask`].
    ///
    /// # Safety
    /// The caller attests interrupts are already masked (typically: this
    /// is an interrupt handler) and that no other reference to the value
    /// is live.
    #[inline(always)]
    pub unsafe fn get_mut_unchecked(&self) -> &mut T {
        unsafe { &mut *self.0.get() }
    }

    /// Raw pointer to the value.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut T {
        self.0.get()
    }
}
