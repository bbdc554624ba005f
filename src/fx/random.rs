//! Random pick of the next effect

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Effect, EffectContext, EffectId};
use crate::engine::ZERO;

/// Effects the stars rotate through
pub const STARS_POOL: [EffectId; 4] = [
    EffectId::StarsFadeIn,
    EffectId::StarsTwinkle,
    EffectId::StarsGlitter,
    EffectId::StarsShooting,
];

/// Effects the balls rotate through
pub const BALLS_POOL: [EffectId; 5] = [
    EffectId::BallsFadeIn,
    EffectId::BallsShimmer,
    EffectId::BallsColorCycle,
    EffectId::BallsSnowFall,
    EffectId::BallsGlitter,
];

/// Hand over to an effect picked at random from a pool, never the one
/// picked last time on the same thread. Takes no time.
#[derive(Debug, Clone, Copy)]
pub struct RandomEffect {
    pool: &'static [EffectId],
}

impl RandomEffect {
    pub const fn new(pool: &'static [EffectId]) -> Self {
        Self { pool }
    }

    /// Pick an effect, excluding `last` unless it is the only choice
    pub fn pick(&self, last: Option<EffectId>, rng: &mut fastrand::Rng) -> Option<EffectId> {
        let candidates = self.pool.iter().filter(|id| Some(**id) != last).count();
        if candidates == 0 {
            return self.pool.first().copied();
        }
        let n = rng.usize(..candidates);
        self.pool
            .iter()
            .copied()
            .filter(|id| Some(*id) != last)
            .nth(n)
    }
}

impl Effect for RandomEffect {
    fn step(&mut self, _first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if let Some(id) = self.pick(ctx.history.last, ctx.rng) {
            #[cfg(feature = "esp32-log")]
            println!("[fx] random pick: {}", id.as_str());

            ctx.history.last = Some(id);
            *next = id;
        }
        ZERO
    }
}
