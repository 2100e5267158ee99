//! Language items for bare-target builds.
//!
//! Host builds (tests) link std and bring their own panic machinery, so
//! everything here is gated on `target_os = "none"`.

// Panic handler when logging is disabled: nothing to report to, so halt
// where a debugger can find us.
#[cfg(all(not(feature = "defmt"), target_os = "none"))]
#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// With defmt enabled, get the message out before halting.
#[cfg(all(feature = "defmt", target_os = "none"))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    defmt::error!("panic: {}", defmt::Display2Format(info));
    loop {}
}
