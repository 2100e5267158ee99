//! Board support and real-time kernel port for the Freescale MC9S12DP256
//! on the Wytec Dragon12 evaluation board.
//!
//! The kernel core itself is external and consumed as a black box; this
//! crate provides everything around it:
//! - Task stack frame synthesis so a new task's first dispatch replays
//!   the S12 interrupt-return protocol
//! - A periodic kernel tick from an ECT output-compare channel, with
//!   drift-free self-relative rearming
//! - The kernel's lifecycle hook set, with application callbacks bound
//!   at compile time
//! - Register-level board drivers: clock/PLL, LEDs, LCD, keypad,
//!   7-segment display, EEPROM/flash, ATD and PWM glue
//!
//! The kernel reaches the port through [`port::Port`]; the port and the
//! drivers reach the kernel through the [`kernel::KernelCore`] and
//! [`kernel::KernelLock`] seams.
//!
//! No `critical_section` implementation is registered here: on the real
//! part, global interrupt masking belongs to the kernel integration.
//! Host tests activate the crate's `std` implementation instead.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod app;
pub mod bsp;
pub mod cfg;
pub mod critical;
pub mod kernel;
pub mod port;
pub mod regs;

// ============ Re-exports ============

pub use critical::{with_masked, CsCell, IntMask};
pub use kernel::{KernelCore, KernelLock, Tcb};
pub use port::hooks::{AppHooks, NoAppHooks};
pub use port::stack::{task_stk_init, MemModel, StkGrowth, TaskEntry};
pub use port::tick::TickSource;
pub use port::{Port, PortCtx};
