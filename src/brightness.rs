//! Per-LED brightness values
//!
//! Written by the effects, read by the renderer.

use core::ops::Index;

use crate::topology::{LEDS_BR_MAX, LEDS_NUM, line_leds};

/// Brightness value (0..=[`LEDS_BR_MAX`]) of each LED
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brightness {
    values: [u8; LEDS_NUM],
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    /// All LEDs off
    pub const fn new() -> Self {
        Self {
            values: [0; LEDS_NUM],
        }
    }

    /// All LEDs at the same brightness
    pub const fn filled(br: u8) -> Self {
        Self {
            values: [clamp(br); LEDS_NUM],
        }
    }

    /// Brightness of a single LED
    #[inline]
    pub fn get(&self, idx: u8) -> u8 {
        self.values[idx as usize]
    }

    /// Set the brightness of a single LED, clamped to the maximum
    #[inline]
    pub fn set(&mut self, idx: u8, br: u8) {
        self.values[idx as usize] = clamp(br);
    }

    /// Set every LED of a list to the same brightness
    pub fn fill(&mut self, list: &[u8], br: u8) {
        for &idx in list {
            self.set(idx, br);
        }
    }

    /// Set every LED of a terminated line to the same brightness
    pub fn fill_line(&mut self, line: &[u8], br: u8) {
        for idx in line_leds(line) {
            self.set(idx, br);
        }
    }

    /// Raw values, indexed by LED
    pub const fn as_slice(&self) -> &[u8; LEDS_NUM] {
        &self.values
    }
}

impl Index<u8> for Brightness {
    type Output = u8;

    fn index(&self, idx: u8) -> &u8 {
        &self.values[idx as usize]
    }
}

const fn clamp(br: u8) -> u8 {
    if br > LEDS_BR_MAX { LEDS_BR_MAX } else { br }
}

/// Scale a brightness by `num / den`, rounding down
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_br(br: u8, num: u32, den: u32) -> u8 {
    if den == 0 {
        return 0;
    }
    (br as u32 * num / den) as u8
}

/// Fraction `num / den` of the maximum brightness, rounding down
#[inline]
pub const fn br_frac(num: u32, den: u32) -> u8 {
    scale_br(LEDS_BR_MAX, num, den)
}

/// Offset a brightness, saturating within 0..=[`LEDS_BR_MAX`]
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn offset_br(br: u8, off: i8) -> u8 {
    let v = br as i16 + off as i16;
    if v < 0 {
        0
    } else if v > LEDS_BR_MAX as i16 {
        LEDS_BR_MAX
    } else {
        v as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_saturates() {
        assert_eq!(offset_br(3, -5), 0);
        assert_eq!(offset_br(60, 10), LEDS_BR_MAX);
        assert_eq!(offset_br(20, -4), 16);
    }

    #[test]
    fn scale_rounds_down() {
        assert_eq!(scale_br(47, 1, 64), 0);
        assert_eq!(scale_br(47, 64, 64), 47);
        assert_eq!(scale_br(63, 32, 64), 31);
    }

    #[test]
    fn fractions_of_max_do_not_overflow() {
        assert_eq!(br_frac(3, 4), 47);
        assert_eq!(br_frac(5, 6), 52);
        assert_eq!(br_frac(5, 8), 39);
        assert_eq!(br_frac(1, 2), 31);
        assert_eq!(br_frac(1, 1), LEDS_BR_MAX);
    }
}
