//! Snow flakes falling down the rows of balls

use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Effect, EffectContext, EffectId};
use crate::engine::{Envelope, ZERO, elapse};
use crate::topology::{BALLS_ROW_LIST, BALLS_ROW_NUM, LEDS_BR_MAX};

/// Brightness of a flake and the glow trailing above it
const TRAIL: [u8; 3] = [LEDS_BR_MAX, 40, 20];

/// Brightness of the balls without flakes
const BR_BASE: u8 = 8;

const FLAKE_MAX: usize = 4;
const FRAME_DELAY: Duration = Duration::from_millis(80);

/// Frames between new flakes
const SPAWN_MIN: u8 = 4;
const SPAWN_MAX: u8 = 16;

const FADE_DELAY: Duration = Duration::from_millis(1000);
const DURATION: Duration = Duration::from_millis(20_000);

/// Rows a flake passes until its trail is gone
#[allow(clippy::cast_possible_truncation)]
const FALL_LEN: u8 = (BALLS_ROW_NUM + TRAIL.len()) as u8;

/// Drop flakes from the top row at random intervals and let them fall
#[derive(Debug, Clone)]
pub struct SnowFallEffect {
    then: EffectId,
    envelope: Envelope,
    /// Row of each falling flake
    flakes: Vec<u8, FLAKE_MAX>,
    /// Frames until the next flake
    spawn_in: u8,
    timer: Duration,
    delay: Duration,
}

impl SnowFallEffect {
    pub fn new(then: EffectId) -> Self {
        Self {
            then,
            envelope: Envelope::new(FADE_DELAY, Some(DURATION)),
            flakes: Vec::new(),
            spawn_in: 0,
            timer: ZERO,
            delay: ZERO,
        }
    }

    fn advance(&mut self, rng: &mut fastrand::Rng) {
        for flake in &mut self.flakes {
            *flake += 1;
        }
        self.flakes.retain(|&row| row < FALL_LEN);

        if self.spawn_in == 0 {
            if self.flakes.push(0).is_err() {
                #[cfg(feature = "esp32-log")]
                println!("[snow_fall] flake skipped, {} falling", self.flakes.len());
            }
            self.spawn_in = rng.u8(SPAWN_MIN..SPAWN_MAX);
        } else {
            self.spawn_in -= 1;
        }
        self.timer = FRAME_DELAY;
    }

    /// Nominal brightness of a row
    fn level(&self, row: usize) -> u8 {
        self.flakes
            .iter()
            .filter_map(|&flake| {
                let flake = usize::from(flake);
                flake.checked_sub(row).and_then(|d| TRAIL.get(d).copied())
            })
            .max()
            .unwrap_or(BR_BASE)
            .max(BR_BASE)
    }
}

impl Effect for SnowFallEffect {
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
        for (i, row) in BALLS_ROW_LIST.iter().enumerate() {
            ctx.leds.fill_line(row, self.envelope.apply(self.level(i)));
        }

        if self.envelope.is_last(delay) {
            *next = self.then;
        }
        self.delay = delay;
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sky_skips_the_new_flake() {
        let mut effect = SnowFallEffect::new(EffectId::BallsRandom);
        let mut rng = fastrand::Rng::with_seed(7);
        for row in 0..FLAKE_MAX as u8 {
            effect.flakes.push(row).unwrap();
        }

        effect.advance(&mut rng);
        assert_eq!(effect.flakes.as_slice(), &[1, 2, 3, 4]);
        assert!((SPAWN_MIN..SPAWN_MAX).contains(&effect.spawn_in));
        assert_eq!(effect.timer, FRAME_DELAY);
    }

    #[test]
    fn flakes_never_exceed_capacity() {
        let mut effect = SnowFallEffect::new(EffectId::BallsRandom);
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..10_000 {
            effect.advance(&mut rng);
            assert!(effect.flakes.len() <= FLAKE_MAX);
            assert!(effect.flakes.iter().all(|&row| row < FALL_LEN));
        }
    }
}
