//! Stop animating

use embassy_time::Duration;

use super::{Effect, EffectContext, EffectId};

/// Delay returned by [`StopEffect`]: long enough to be practically forever
pub const STOP_DELAY: Duration = Duration::from_millis(3_600_000);

/// Leaves the LEDs as they are, forever
#[derive(Debug, Clone, Copy, Default)]
pub struct StopEffect;

impl Effect for StopEffect {
    fn step(
        &mut self,
        _first: bool,
        _next: &mut EffectId,
        _ctx: &mut EffectContext<'_>,
    ) -> Duration {
        STOP_DELAY
    }
}
