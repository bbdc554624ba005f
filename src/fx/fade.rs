//! Linear fades of a whole LED group
//!
//! Brightness ramps run over a fixed wall-clock duration divided into
//! [`LEDS_BR_NUM`] equal steps.

use embassy_time::Duration;

use super::{BR_BASE, Effect, EffectContext, EffectId};
use crate::topology::{BALLS_SWNE_LINE_LEN, LEDS_BR_NUM};

#[allow(clippy::cast_possible_truncation)]
const FADE_STEP_NUM: u8 = LEDS_BR_NUM as u8;

/// Number of steps a line takes to reach full brightness in a line sweep
const LINE_RAMP_STEPS: u8 = 4;

fn step_delay(duration: Duration, steps: u64) -> Duration {
    Duration::from_millis((duration.as_millis() / steps.max(1)).max(1))
}

/// Fade a group of LEDs from one brightness to another
#[derive(Debug, Clone)]
pub struct FadeEffect {
    list: &'static [u8],
    from: u8,
    to: u8,
    step_delay: Duration,
    then: EffectId,
    /// Steps done
    step: u8,
}

impl FadeEffect {
    pub fn new(list: &'static [u8], from: u8, to: u8, duration: Duration, then: EffectId) -> Self {
        Self {
            list,
            from,
            to,
            step_delay: step_delay(duration, u64::from(FADE_STEP_NUM)),
            then,
            step: 0,
        }
    }

    /// Brightness after `step` steps
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn level(&self, step: u8) -> u8 {
        let from = i32::from(self.from);
        let to = i32::from(self.to);
        (from + (to - from) * i32::from(step) / i32::from(FADE_STEP_NUM)) as u8
    }
}

impl Effect for FadeEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            self.step = 0;
        }

        self.step = (self.step + 1).min(FADE_STEP_NUM);
        ctx.leds.fill(self.list, self.level(self.step));

        if self.step >= FADE_STEP_NUM {
            *next = self.then;
        }

        self.step_delay
    }
}

/// Fade a group in line by line, each line ramping up over a few steps
/// after the previous one started
#[derive(Debug, Clone)]
pub struct LineFadeEffect {
    lines: &'static [[u8; BALLS_SWNE_LINE_LEN]],
    step_delay: Duration,
    then: EffectId,
    step: usize,
}

impl LineFadeEffect {
    pub fn new(
        lines: &'static [[u8; BALLS_SWNE_LINE_LEN]],
        duration: Duration,
        then: EffectId,
    ) -> Self {
        let steps = lines.len() as u64 + u64::from(LINE_RAMP_STEPS);
        Self {
            lines,
            step_delay: step_delay(duration, steps),
            then,
            step: 0,
        }
    }

    /// Brightness of line `i` at `step`
    #[allow(clippy::cast_possible_truncation)]
    fn level(step: usize, i: usize) -> u8 {
        let ramp = usize::from(LINE_RAMP_STEPS);
        if step <= i {
            0
        } else if step < i + ramp {
            (usize::from(BR_BASE) * (step - i) / ramp) as u8
        } else {
            BR_BASE
        }
    }
}

impl Effect for LineFadeEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            self.step = 0;
        }

        for (i, line) in self.lines.iter().enumerate() {
            ctx.leds.fill_line(line, Self::level(self.step, i));
        }

        self.step += 1;
        if self.step >= self.lines.len() + usize::from(LINE_RAMP_STEPS) {
            *next = self.then;
        }

        self.step_delay
    }
}
