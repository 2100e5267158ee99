//! Parking-assist logic: IR ranger counts to distance to warning zone.
//!
//! The Sharp-style IR ranger on the analog input reports closer targets
//! as higher voltages, on a curve that is nowhere near linear. This
//! module holds the calibration table that straightens it out and the
//! zone policy built on top. Everything here is pure math, so it runs
//! and tests anywhere; the demo wires it to the A/D, LCD, display and
//! speaker drivers.

/// Calibration: A/D counts against distance in centimeters, closest
/// first. Counts fall monotonically as the target recedes; the bench
/// data runs per-centimeter out to 36 cm and coarsens beyond. Past the
/// last entry the sensor's output is indistinguishable from no target.
const RANGE_TABLE: [(u16, u16); 44] = [
    (519, 10), (483, 11), (447, 12), (418, 13),
    (390, 14), (369, 15), (348, 16), (331, 17),
    (315, 18), (299, 19), (284, 20), (271, 21),
    (259, 22), (253, 23), (247, 24), (237, 25),
    (227, 26), (218, 27), (210, 28), (203, 29),
    (197, 30), (192, 31), (187, 32), (182, 33),
    (178, 34), (171, 35), (165, 36), (161, 38),
    (152, 40), (149, 42), (133, 44), (132, 48),
    (124, 50), (118, 52), (115, 54), (106, 56),
    (104, 58), (102, 62), (101, 64), (98, 66),
    (94, 68), (86, 70), (83, 72), (82, 74),
];

/// Distance for a raw A/D reading, in whole centimeters.
///
/// Readings above the table saturate at the closest calibrated
/// distance; readings below it mean the target is out of range and
/// return `None`.
pub fn ir_range_cm(counts: u16) -> Option<u16> {
    for &(c, cm) in RANGE_TABLE.iter() {
        if counts >= c {
            return Some(cm);
        }
    }
    None
}

/// Warning zone for a measured distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Closer than 13 cm.
    Danger,
    /// 13 to 19 cm.
    SlowDown,
    /// 20 cm or more, still in sensor range.
    Safe,
    /// Nothing the sensor can see.
    OutOfRange,
}

impl Zone {
    /// Classify a ranging result.
    pub fn of(range_cm: Option<u16>) -> Zone {
        match range_cm {
            None => Zone::OutOfRange,
            Some(cm) if cm < 13 => Zone::Danger,
            Some(cm) if cm < 20 => Zone::SlowDown,
            Some(_) => Zone::Safe,
        }
    }

    /// Operator-facing text, at most one 16-column display row.
    pub fn label(self) -> &'static str {
        match self {
            Zone::Danger => "DANGER! BACK UP!",
            Zone::SlowDown => "SLOW DOWN",
            Zone::Safe => "SAFE",
            Zone::OutOfRange => "OUT OF RANGE",
        }
    }

    /// Speaker period for the zone's warning tone, in 6 kHz PWM
    /// counts; `None` is silence.
    pub fn speaker_period(self) -> Option<u8> {
        match self {
            Zone::Danger => Some(12),
            Zone::SlowDown => Some(30),
            Zone::Safe => Some(60),
            Zone::OutOfRange => None,
        }
    }
}
