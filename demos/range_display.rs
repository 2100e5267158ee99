//! Parking-assist demo for the Dragon12 board.
//!
//! Reads the IR ranger on A/D input 6, shows the distance on the
//! seven-segment display, the zone text on the LCD, and beeps the
//! speaker faster as the target closes in. Any keypad press toggles
//! the speaker.
//!
//! There is no scheduler here: a spin-wait stand-in fills the kernel
//! seam so the board package runs by itself. The interrupt bodies at
//! the bottom are plain calls; the integrator's vector stubs JSR to
//! them and return with RTI.

#![no_std]
#![no_main]

use dragon12_bsp::bsp::atd::Atd;
use dragon12_bsp::bsp::keypad::{Keypad, KeypadPins};
use dragon12_bsp::bsp::lcd::{Lcd, LcdPins};
use dragon12_bsp::bsp::pwm::Speaker;
use dragon12_bsp::bsp::sevenseg::{SegPins, SevenSeg};
use dragon12_bsp::bsp::{self, dly_ms};
use dragon12_bsp::{app, cfg, regs};
use dragon12_bsp::{KernelCore, NoAppHooks, Port, TickSource};

/// IR ranger input channel on A/D block 0.
const IR_CH: u8 = 6;

/// Kernel stand-in: delays spin on the free-running counter, tick
/// notifications fall on the floor.
struct ShimKernel;

impl KernelCore for ShimKernel {
    fn time_tick(&self) {}

    fn tmr_signal(&self) {}

    fn time_dly(&self, ticks: u32) {
        let reload = PORT.ctx().tick_reload();
        for _ in 0..ticks {
            let start = regs::ECT.tcnt.read();
            while regs::ECT.tcnt.read().wrapping_sub(start) <= reload {}
        }
    }
}

static PORT: Port<ShimKernel, NoAppHooks> = Port::new(ShimKernel, NoAppHooks);
static TICK: TickSource = TickSource::new(regs::ECT, cfg::TICK_OC_CH);
static DISPLAY: SevenSeg = SevenSeg::new(regs::ECT, cfg::SEG_OC_CH, SegPins::board());
static SPEAKER: Speaker = Speaker::new(regs::PWM);

#[no_mangle]
pub extern "C" fn os_tick_isr() {
    TICK.isr_handler(&PORT);
}

#[no_mangle]
pub extern "C" fn display_scan_isr() {
    DISPLAY.isr_handler();
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    bsp::init(&PORT, &TICK);
    DISPLAY.init(bsp::clock::bus_clk_hz(regs::CRG), cfg::SEG_SCANS_PER_SEC);
    SPEAKER.init();

    let lcd = Lcd::init(PORT.kernel(), LcdPins::board());
    lcd.write_line(0, "BACKUP RANGER");

    let keypad = Keypad::init(KeypadPins::board());
    let atd = Atd::new(regs::ATD0);
    atd.init();
    dly_ms(PORT.kernel(), 1);
    atd.start(IR_CH);

    let mut muted = false;
    let mut was_pressed = false;
    let mut last_zone = None;
    let mut last_tone = None;

    loop {
        let pressed = keypad.scan().is_some();
        if pressed && !was_pressed {
            muted = !muted;
        }
        was_pressed = pressed;

        let range = app::ir_range_cm(atd.read());
        let zone = app::Zone::of(range);

        DISPLAY.set(range.unwrap_or(0));
        if last_zone != Some(zone) {
            lcd.write_line(1, zone.label());
            last_zone = Some(zone);
        }

        let tone = if muted { None } else { zone.speaker_period() };
        if tone != last_tone {
            match tone {
                Some(period) => SPEAKER.play(period),
                None => SPEAKER.stop(),
            }
            last_tone = tone;
        }

        dly_ms(PORT.kernel(), 100);
    }
}
