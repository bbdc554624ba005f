//! Colour groups of balls taking turns to light up

use embassy_time::Duration;

use super::{Effect, EffectContext, EffectId};
use crate::engine::{Envelope, ZERO, elapse};
use crate::topology::{BALLS_COLOR_LIST, LEDS_BR_MAX};

const BR_HI: u8 = LEDS_BR_MAX;
const BR_LO: u8 = 16;

/// Steps of a transition between two colours
const HUE_STEP_NUM: u8 = 8;
const HUE_STEP_DELAY: Duration = Duration::from_millis(50);

/// Time a colour stays lit alone
const HOLD_DELAY: Duration = Duration::from_millis(1500);

const FADE_DELAY: Duration = Duration::from_millis(1000);
const DURATION: Duration = Duration::from_millis(20_000);

const COLOR_NUM: usize = BALLS_COLOR_LIST.len();

/// Cross-fade from one colour group to the next, round and round
#[derive(Debug, Clone)]
pub struct ColorCycleEffect {
    then: EffectId,
    envelope: Envelope,
    /// Colour being lit up
    color: usize,
    /// Transition steps done towards `color`
    hue_step: u8,
    timer: Duration,
    delay: Duration,
}

impl ColorCycleEffect {
    pub fn new(then: EffectId) -> Self {
        Self {
            then,
            envelope: Envelope::new(FADE_DELAY, Some(DURATION)),
            color: 0,
            hue_step: HUE_STEP_NUM,
            timer: HOLD_DELAY,
            delay: ZERO,
        }
    }

    fn advance(&mut self) {
        if self.hue_step >= HUE_STEP_NUM {
            self.color = (self.color + 1) % COLOR_NUM;
            self.hue_step = 0;
        }
        self.hue_step += 1;
        self.timer = if self.hue_step >= HUE_STEP_NUM {
            HOLD_DELAY
        } else {
            HUE_STEP_DELAY
        };
    }

    /// Nominal brightness of a colour group
    #[allow(clippy::cast_possible_truncation)]
    fn level(&self, color: usize) -> u8 {
        let span = u32::from(BR_HI - BR_LO);
        let lit = (span * u32::from(self.hue_step) / u32::from(HUE_STEP_NUM)) as u8;
        if color == self.color {
            BR_LO + lit
        } else if (color + 1) % COLOR_NUM == self.color {
            BR_HI - lit
        } else {
            BR_LO
        }
    }
}

impl Effect for ColorCycleEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            *self = Self::new(self.then);
        }

        let elapsed = self.delay;
        self.envelope.elapse(elapsed);
        self.timer = elapse(self.timer, elapsed);
        if self.timer == ZERO {
            self.advance();
        }

        let delay = self.timer.min(self.envelope.next_event());
        for (color, list) in BALLS_COLOR_LIST.iter().enumerate() {
            ctx.leds.fill(list, self.envelope.apply(self.level(color)));
        }

        if self.envelope.is_last(delay) {
            *next = self.then;
        }
        self.delay = delay;
        delay
    }
}
