//! First-dispatch task stack frames.
//!
//! The kernel starts a task by "returning" into it: the dispatch code
//! pops a frame this module fabricated, and the CPU lands in the task
//! body exactly as if it were resuming from an interrupt. The frame must
//! therefore mirror, byte for byte and in reverse, what the S12's RTI
//! instruction pops: condition codes, D (stacked as B then A), X, Y,
//! return address.
//!
//! Under the banked code model a return address is 24 bits: a 16-bit
//! in-window offset plus a PPAGE selector. Only the offset fits RTI's
//! return slot, so the selector byte sits below the RTI frame and the
//! task-level dispatch path pulls it by hand before returning. That
//! dispatch path is a plain same-bank JSR: the resident serial monitor
//! owns the SWI vector for breakpoints, and a far CALL would stack a
//! second selector byte where RTI expects condition codes.

use crate::cfg;

/// Code addressing model for task entry points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemModel {
    /// Entry points fit 16 bits; no selector byte in the frame.
    Flat,
    /// 24-bit entry points; the frame carries a page selector byte.
    Banked,
}

/// Stack growth direction.
///
/// The S12 pushes toward lower addresses; the variant exists so the
/// convention is stated and checked in `cfg`, not assumed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StkGrowth {
    Descending,
    Ascending,
}

/// A task entry point: PPAGE selector in bits 16..24, in-window offset
/// in bits 0..16. Flat-model entries carry a zero page.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TaskEntry(u32);

impl TaskEntry {
    /// Entry at a 24-bit linear code address.
    pub const fn new(addr: u32) -> Self {
        TaskEntry(addr & 0x00FF_FFFF)
    }

    /// Entry at `offset` within the 16K window of `page`.
    pub const fn banked(page: u8, offset: u16) -> Self {
        TaskEntry(((page as u32) << 16) | offset as u32)
    }

    /// The page-independent half: what goes in the RTI return slot.
    pub const fn offset(self) -> u16 {
        self.0 as u16
    }

    /// The PPAGE selector the dispatch path restores by hand.
    pub const fn page(self) -> u8 {
        (self.0 >> 16) as u8
    }
}

/// Condition codes a task starts with: STOP disabled, XIRQ masked for
/// good, maskable interrupts open.
pub const INIT_CCR: u8 = 0xC0;

// Register sentinels. Deliberately not zero: a task that faults before
// its first real context switch shows these in a stack dump, which tells
// you immediately the frame was never live.
const SENTINEL_A: u8 = 0xAA;
const SENTINEL_B: u8 = 0xBB;
const SENTINEL_X: u16 = 0x1111;
const SENTINEL_Y: u16 = 0x2222;

/// Frame size with the page selector byte.
pub const FRAME_BANKED: usize = 12;
/// Frame size without it.
pub const FRAME_FLAT: usize = 11;

/// Bytes a first-dispatch frame occupies under `model`.
pub const fn frame_len(model: MemModel) -> usize {
    match model {
        MemModel::Banked => FRAME_BANKED,
        MemModel::Flat => FRAME_FLAT,
    }
}

/// Serialize a first-dispatch frame into the front of `buf`, lowest
/// address first, and return the byte count written.
///
/// Layout (ascending addresses, i.e. pop order at dispatch):
///
/// ```text
/// [page]   PPAGE selector (banked model only), pulled by the dispatch
///          code itself before RTI
/// ccr      INIT_CCR
/// b, a     0xBB, 0xAA        (RTI pops D stacked as B:A)
/// x        0x1111 big-endian
/// y        0x2222 big-endian
/// pc       entry offset, big-endian
/// arg      argument word, big-endian; top of stack once the task runs
/// ```
///
/// The argument sits above the return slot, so after RTI the stack
/// pointer rests on it: the task body finds its argument as the word on
/// top of its stack, matching a caller that pushed it just before
/// transferring control.
pub fn write_frame(buf: &mut [u8], entry: TaskEntry, arg: u16, model: MemModel) -> usize {
    let mut i = 0;
    if let MemModel::Banked = model {
        buf[i] = entry.page();
        i += 1;
    }
    buf[i] = INIT_CCR;
    i += 1;
    buf[i] = SENTINEL_B;
    i += 1;
    buf[i] = SENTINEL_A;
    i += 1;
    buf[i..i + 2].copy_from_slice(&SENTINEL_X.to_be_bytes());
    i += 2;
    buf[i..i + 2].copy_from_slice(&SENTINEL_Y.to_be_bytes());
    i += 2;
    buf[i..i + 2].copy_from_slice(&entry.offset().to_be_bytes());
    i += 2;
    buf[i..i + 2].copy_from_slice(&arg.to_be_bytes());
    i += 2;
    i
}

/// Build the first-dispatch frame at the top of `stk` and return the new
/// top-of-stack index, the byte the dispatch path pops first.
///
/// The stack grows downward, so the frame lands in the highest
/// `frame_len` bytes of the region and the returned index is what the
/// kernel records as the task's stack pointer.
///
/// `opt` carries the kernel's task-creation option bits. This port
/// accepts them for interface compatibility and interprets none of them
/// (reserved); callers should not expect option-driven behavior here.
///
/// The caller owns the preconditions: the region is the task's alone,
/// and at least [`frame_len`] bytes long (shorter regions panic on the
/// slice write rather than corrupt memory).
pub fn task_stk_init(entry: TaskEntry, arg: u16, stk: &mut [u8], _opt: u16) -> usize {
    let top = stk.len() - frame_len(cfg::MEM_MODEL);
    write_frame(&mut stk[top..], entry, arg, cfg::MEM_MODEL);
    top
}
