//! Square waves for the on-board speaker, PWM channel 5.
//!
//! The channel runs from scaled clock SA, set up as 6 kHz: one count
//! per 166 µs. Audible tones then fit comfortably in the 8-bit period
//! register; period 12 is 500 Hz, period 60 is 100 Hz.

use crate::regs::PwmBlock;

const CH: usize = 5;
const CH_MASK: u8 = 0x20;

// Clock A = bus / 16.
const PRCLK_A_DIV16: u8 = 0x04;
// SA = clock A / (2 * 125); 6 kHz at a 24 MHz bus.
const SCLA_DIV: u8 = 125;

/// The speaker output.
pub struct Speaker {
    pwm: PwmBlock,
}

impl Speaker {
    pub const fn new(pwm: PwmBlock) -> Self {
        Speaker { pwm }
    }

    /// Set up the channel's clock tree and polarity, output disabled.
    pub fn init(&self) {
        self.pwm.pwmprclk.write(PRCLK_A_DIV16);
        self.pwm.pwmscla.write(SCLA_DIV);
        self.pwm.pwmclk.set(CH_MASK);
        self.pwm.pwmpol.set(CH_MASK);
        self.pwm.pwmcae.clear(CH_MASK);
        self.pwm.pwmctl.write(0x00);
        self.pwm.pwme.clear(CH_MASK);
    }

    /// Drive a square wave of `period` SA counts (50% duty). At the
    /// 6 kHz SA this makes a tone of `6000 / period` Hz.
    pub fn play(&self, period: u8) {
        debug_assert!(period >= 2);
        self.pwm.per(CH).write(period);
        self.pwm.dty(CH).write(period / 2);
        // Writing the counter resets it, so the new period starts clean.
        self.pwm.cnt(CH).write(0);
        self.pwm.pwme.set(CH_MASK);
    }

    /// Silence.
    pub fn stop(&self) {
        self.pwm.pwme.clear(CH_MASK);
    }
}
