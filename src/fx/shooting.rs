//! Shooting stars crossing the star columns

use embassy_time::Duration;

use super::{Effect, EffectContext, EffectId};
use crate::engine::{Envelope, ZERO, elapse, random_duration};
use crate::topology::{LEDS_BR_MAX, STARS_COLUMN_LIST, STARS_COLUMN_NUM};

/// Brightness of the head and the tail behind it
const TAIL: [u8; 4] = [LEDS_BR_MAX, 40, 24, 12];

/// Brightness of the stars without a shooting star
const BR_SKY: u8 = 16;

/// Time the head spends on each column
const COLUMN_DELAY: Duration = Duration::from_millis(60);

const PAUSE_MIN: Duration = Duration::from_millis(800);
const PAUSE_MAX: Duration = Duration::from_millis(3000);

const FADE_DELAY: Duration = Duration::from_millis(1000);
const DURATION: Duration = Duration::from_millis(20_000);

/// Head positions of a flight, until the tail leaves the last column
const FLIGHT_LEN: usize = STARS_COLUMN_NUM + TAIL.len();

/// Dim the stars and send bright heads with fading tails across them,
/// in a random direction, after random pauses
#[derive(Debug, Clone)]
pub struct ShootingEffect {
    then: EffectId,
    envelope: Envelope,
    /// Column of the head, counted in the flight direction
    head: usize,
    flying: bool,
    reverse: bool,
    /// Time left until the head moves or a flight starts
    timer: Duration,
    /// Delay returned by the previous step
    delay: Duration,
}

impl ShootingEffect {
    pub fn new(then: EffectId) -> Self {
        Self {
            then,
            envelope: Envelope::new(FADE_DELAY, Some(DURATION)),
            head: 0,
            flying: false,
            reverse: false,
            timer: ZERO,
            delay: ZERO,
        }
    }

    fn advance(&mut self, rng: &mut fastrand::Rng) {
        if self.flying {
            self.head += 1;
            if self.head >= FLIGHT_LEN {
                self.flying = false;
                self.timer = random_duration(rng, PAUSE_MIN, PAUSE_MAX);
                return;
            }
        } else {
            self.flying = true;
            self.head = 0;
            self.reverse = rng.bool();
        }
        self.timer = COLUMN_DELAY;
    }

    /// Nominal brightness of a column, counted left to right
    fn level(&self, column: usize) -> u8 {
        let column = if self.reverse {
            STARS_COLUMN_NUM - 1 - column
        } else {
            column
        };
        if !self.flying || column > self.head {
            return BR_SKY;
        }
        TAIL.get(self.head - column).copied().unwrap_or(BR_SKY)
    }
}

impl Effect for ShootingEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            *self = Self::new(self.then);
        }

        let elapsed = self.delay;
        self.envelope.elapse(elapsed);
        self.timer = elapse(self.timer, elapsed);
        if self.timer == ZERO {
            self.advance(ctx.rng);
        }

        let delay = self.timer.min(self.envelope.next_event());
        for (i, column) in STARS_COLUMN_LIST.iter().enumerate() {
            ctx.leds
                .fill_line(column, self.envelope.apply(self.level(i)));
        }

        if self.envelope.is_last(delay) {
            *next = self.then;
        }
        self.delay = delay;
        delay
    }
}
