//! Brightness renderer
//!
//! Rasterizes the brightness array into the inactive PWM bank. The active
//! bank is never touched here; banks only change roles through
//! [`PwmBanks::request_swap`].

use crate::brightness::Brightness;
use crate::output::{PWM_PHASES, PhaseFrame, PwmBanks};
use crate::topology::{LEDS_BR_NUM, LEDS_BYTES, LEDS_NUM};

/// Brightness value to pulse length map, approximating perceived brightness
pub const PULSE_LENGTHS: [u8; LEDS_BR_NUM] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, //
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x02, 0x02, //
    0x02, 0x02, 0x02, 0x03, 0x03, 0x03, 0x03, 0x04, //
    0x04, 0x04, 0x05, 0x05, 0x05, 0x06, 0x06, 0x07, //
    0x07, 0x08, 0x09, 0x09, 0x0a, 0x0b, 0x0b, 0x0c, //
    0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x13, 0x14, 0x16, //
    0x17, 0x19, 0x1a, 0x1c, 0x1e, 0x21, 0x23, 0x25, //
    0x28, 0x2b, 0x2e, 0x31, 0x34, 0x38, 0x3c, 0x40, //
];

const _: () = {
    let mut i = 1;
    while i < LEDS_BR_NUM {
        assert!(PULSE_LENGTHS[i - 1] <= PULSE_LENGTHS[i], "pulse lengths must not decrease");
        i += 1;
    }
    assert!(PULSE_LENGTHS[LEDS_BR_NUM - 1] as usize == PWM_PHASES);
};

/// Number of PWM phases an LED with the given brightness is lit for
#[inline]
pub const fn pulse_length(br: u8) -> u8 {
    let idx = br as usize;
    if idx < LEDS_BR_NUM {
        PULSE_LENGTHS[idx]
    } else {
        PULSE_LENGTHS[LEDS_BR_NUM - 1]
    }
}

/// Renders brightness values into the inactive bank of a [`PwmBanks`]
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    banks: &'a PwmBanks,
}

impl<'a> Renderer<'a> {
    pub const fn new(banks: &'a PwmBanks) -> Self {
        Self { banks }
    }

    /// Banks being rendered into
    pub const fn banks(&self) -> &'a PwmBanks {
        self.banks
    }

    /// Render every LED into the inactive bank
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&self, br: &Brightness) {
        let mut lengths = [0u8; LEDS_NUM];
        for (length, &value) in lengths.iter_mut().zip(br.as_slice()) {
            *length = pulse_length(value);
        }

        for phase in 0..PWM_PHASES {
            let mut frame: PhaseFrame = [0; LEDS_BYTES];
            for (i, &length) in lengths.iter().enumerate() {
                if length as usize > phase {
                    frame[i >> 3] |= 1 << (i & 0x7);
                }
            }
            self.banks.store_phase(phase, &frame);
        }
    }

    /// Render only the listed LEDs into the inactive bank, leaving the
    /// others as they are
    pub fn render_list(&self, br: &Brightness, list: &[u8]) {
        for &led in list {
            let length = pulse_length(br.get(led)) as usize;
            for phase in 0..PWM_PHASES {
                self.banks.store_bit(phase, led, phase < length);
            }
        }
    }
}
