//! Effects running on the script engine, and the scripts they run

use embassy_time::Duration;

use super::{BR_BASE, Effect, EffectContext, EffectId};
use crate::brightness::br_frac;
use crate::engine::{Script, ScriptSeg, Shimmer};
use crate::topology::{BALLS_LIST, LEDS_BR_MAX, STARS_LIST};

/// Fade-in/out delay of every scripted effect
const FADE_DELAY: Duration = Duration::from_millis(1000);

/// Run a script built fresh on every start, until it fades out
#[derive(Debug, Clone)]
pub struct ScriptEffect {
    build: fn() -> Script,
    script: Script,
    then: EffectId,
}

impl ScriptEffect {
    pub fn new(build: fn() -> Script, then: EffectId) -> Self {
        Self {
            build,
            script: build(),
            then,
        }
    }
}

impl Effect for ScriptEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            self.script = (self.build)();
        }

        let step = self.script.step(ctx.rng, ctx.leds);
        if step.last {
            *next = self.then;
        }
        step.delay
    }
}

/// Stars dimming briefly at random
pub(super) fn stars_twinkle() -> Script {
    Shimmer {
        bright_br: BR_BASE,
        bright_delay: Duration::from_millis(4000),
        dimmed_br: LEDS_BR_MAX / 4,
        dimmed_delay: Duration::from_millis(400),
        fade_delay: FADE_DELAY,
        duration: Some(Duration::from_millis(20_000)),
    }
    .script(&STARS_LIST)
}

/// Balls dimming slightly at random
pub(super) fn balls_shimmer() -> Script {
    Shimmer {
        bright_br: BR_BASE,
        bright_delay: Duration::from_millis(3000),
        dimmed_br: LEDS_BR_MAX / 2,
        dimmed_delay: Duration::from_millis(300),
        fade_delay: FADE_DELAY,
        duration: Some(Duration::from_millis(25_000)),
    }
    .script(&BALLS_LIST)
}

/// Glitter segments: rest at the base brightness, flash up by `spark` and
/// decay back in four steps
#[allow(clippy::cast_possible_wrap)]
const fn glitter(rest_min: u64, rest_max: u64, spark: u8) -> [ScriptSeg; 3] {
    let spark = spark as i8;
    [
        ScriptSeg::hold(
            Duration::from_millis(rest_min),
            Duration::from_millis(rest_max),
        ),
        ScriptSeg {
            step_num_min: 1,
            step_num_max: 1,
            step_br_off: spark,
            step_delay_min: Duration::from_millis(40),
            step_delay_max: Duration::from_millis(100),
        },
        ScriptSeg::fixed(4, -(spark / 4), Duration::from_millis(30)),
    ]
}

/// Dim stars flashing up at random
pub(super) fn stars_glitter() -> Script {
    let base = LEDS_BR_MAX / 2;
    Script::new(
        &glitter(300, 4000, LEDS_BR_MAX - base),
        &STARS_LIST,
        base,
        FADE_DELAY,
        Some(Duration::from_millis(15_000)),
    )
}

/// Balls flashing up at random
pub(super) fn balls_glitter() -> Script {
    let base = br_frac(5, 8);
    Script::new(
        &glitter(500, 5000, LEDS_BR_MAX - base),
        &BALLS_LIST,
        base,
        FADE_DELAY,
        Some(Duration::from_millis(20_000)),
    )
}
