//! Waves sweeping through diagonal lines of LEDs

use embassy_time::Duration;

use super::{BR_BASE, Effect, EffectContext, EffectId};
use crate::brightness::br_frac;
use crate::topology::{BALLS_SWNE_LINE_LEN, LEDS_BR_MAX};

/// Brightness of the lines next to the crest
const BR_SHOULDER: u8 = br_frac(5, 6);

/// Pause between waves
const WAVE_PAUSE: Duration = Duration::from_millis(2000);

/// Duration of one wave sweep, including the lead-in and lead-out
const WAVE_SWEEP_MS: u64 = 1000;

/// Send a wave through the lines, then rest, for a number of waves
#[derive(Debug, Clone)]
pub struct WaveEffect {
    lines: &'static [[u8; BALLS_SWNE_LINE_LEN]],
    step_delay: Duration,
    waves: u8,
    then: EffectId,
    /// Line at the crest, starts before the first line
    step: isize,
    /// Waves done
    done: u8,
}

impl WaveEffect {
    pub fn new(lines: &'static [[u8; BALLS_SWNE_LINE_LEN]], waves: u8, then: EffectId) -> Self {
        Self {
            lines,
            step_delay: Duration::from_millis(WAVE_SWEEP_MS / (lines.len() as u64 + 4)),
            waves,
            then,
            step: -2,
            done: 0,
        }
    }

    fn level(distance: isize) -> u8 {
        match distance {
            0 => LEDS_BR_MAX,
            -1 | 1 => BR_SHOULDER,
            _ => BR_BASE,
        }
    }
}

impl Effect for WaveEffect {
    #[allow(clippy::cast_possible_wrap)]
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            self.step = -2;
            self.done = 0;
        }

        for (i, line) in self.lines.iter().enumerate() {
            ctx.leds.fill_line(line, Self::level(i as isize - self.step));
        }

        let delay = if self.step == -2 {
            WAVE_PAUSE
        } else {
            self.step_delay
        };

        self.step += 1;
        if self.step >= self.lines.len() as isize + 2 {
            self.step = -2;
            self.done = self.done.saturating_add(1);
            if self.done >= self.waves {
                *next = self.then;
            }
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crest_levels() {
        assert_eq!(WaveEffect::level(0), 63);
        assert_eq!(BR_SHOULDER, 52);
        assert_eq!(WaveEffect::level(-1), 52);
        assert_eq!(WaveEffect::level(3), 47);
    }
}
