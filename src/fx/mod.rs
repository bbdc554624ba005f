//! Effect system with compile-time known effect variants
//!
//! All effect states are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait, keeping its state in its own
//! struct, so the same effect may run on several threads at once.

mod blink;
mod color_cycle;
mod fade;
mod random;
mod script;
mod shooting;
mod snow_fall;
mod stop;
mod wave;

use embassy_time::Duration;

pub use blink::BlinkEffect;
pub use color_cycle::ColorCycleEffect;
pub use fade::{FadeEffect, LineFadeEffect};
pub use random::{BALLS_POOL, RandomEffect, STARS_POOL};
pub use script::ScriptEffect;
pub use shooting::ShootingEffect;
pub use snow_fall::SnowFallEffect;
pub use stop::{STOP_DELAY, StopEffect};
pub use wave::WaveEffect;

use crate::brightness::{Brightness, br_frac};
use crate::topology::{BALLS_LIST, BALLS_SWNE_LINE_LIST, LEDS_BR_MAX, STARS_LIST, TOPPER_LIST};

/// Resting brightness of stars and balls: 3/4 of the maximum
pub const BR_BASE: u8 = br_frac(3, 4);

const EFFECT_NAME_STOP: &str = "stop";
const EFFECT_NAME_STARS_FADE_IN: &str = "stars_fade_in";
const EFFECT_NAME_STARS_BLINK: &str = "stars_blink";
const EFFECT_NAME_STARS_FADE_OUT: &str = "stars_fade_out";
const EFFECT_NAME_STARS_TWINKLE: &str = "stars_twinkle";
const EFFECT_NAME_STARS_GLITTER: &str = "stars_glitter";
const EFFECT_NAME_STARS_SHOOTING: &str = "stars_shooting";
const EFFECT_NAME_STARS_RANDOM: &str = "stars_random";
const EFFECT_NAME_TOPPER_FADE_IN: &str = "topper_fade_in";
const EFFECT_NAME_BALLS_FADE_IN: &str = "balls_fade_in";
const EFFECT_NAME_BALLS_WAVE: &str = "balls_wave";
const EFFECT_NAME_BALLS_FADE_OUT: &str = "balls_fade_out";
const EFFECT_NAME_BALLS_SHIMMER: &str = "balls_shimmer";
const EFFECT_NAME_BALLS_COLOR_CYCLE: &str = "balls_color_cycle";
const EFFECT_NAME_BALLS_SNOW_FALL: &str = "balls_snow_fall";
const EFFECT_NAME_BALLS_GLITTER: &str = "balls_glitter";
const EFFECT_NAME_BALLS_RANDOM: &str = "balls_random";

const EFFECT_ID_STOP: u8 = 0;
const EFFECT_ID_STARS_FADE_IN: u8 = 1;
const EFFECT_ID_STARS_BLINK: u8 = 2;
const EFFECT_ID_STARS_FADE_OUT: u8 = 3;
const EFFECT_ID_STARS_TWINKLE: u8 = 4;
const EFFECT_ID_STARS_GLITTER: u8 = 5;
const EFFECT_ID_STARS_SHOOTING: u8 = 6;
const EFFECT_ID_STARS_RANDOM: u8 = 7;
const EFFECT_ID_TOPPER_FADE_IN: u8 = 8;
const EFFECT_ID_BALLS_FADE_IN: u8 = 9;
const EFFECT_ID_BALLS_WAVE: u8 = 10;
const EFFECT_ID_BALLS_FADE_OUT: u8 = 11;
const EFFECT_ID_BALLS_SHIMMER: u8 = 12;
const EFFECT_ID_BALLS_COLOR_CYCLE: u8 = 13;
const EFFECT_ID_BALLS_SNOW_FALL: u8 = 14;
const EFFECT_ID_BALLS_GLITTER: u8 = 15;
const EFFECT_ID_BALLS_RANDOM: u8 = 16;

/// Everything an effect may touch besides its own state
pub struct EffectContext<'a> {
    /// Brightness of every LED
    pub leds: &'a mut Brightness,
    /// Pseudo-random generator, seeded once at startup
    pub rng: &'a mut fastrand::Rng,
    /// Random choices made on the running thread
    pub history: &'a mut PickHistory,
}

/// Last random effect picked on a thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickHistory {
    pub last: Option<EffectId>,
}

pub trait Effect {
    /// Compute the next frame.
    ///
    /// When `first` is set, all effect state is reinitialized before
    /// stepping. The effect writes the brightness that should take effect
    /// once the returned delay elapses. Overwriting `next` hands control
    /// over to another effect after that delay.
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration;
}

/// Effect slot - enum containing all possible effect states
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Idle forever
    Stop(StopEffect),
    /// Linear group fade
    Fade(FadeEffect),
    /// Diagonal line sweep fade
    LineFade(LineFadeEffect),
    /// Random dimming of a few LEDs
    Blink(BlinkEffect),
    /// Wave along diagonal lines
    Wave(WaveEffect),
    /// Script engine driven effect
    Script(ScriptEffect),
    /// Shooting star across columns
    Shooting(ShootingEffect),
    /// Cross-fading color groups
    ColorCycle(ColorCycleEffect),
    /// Flakes falling down rows
    SnowFall(SnowFallEffect),
    /// Random pick of the next effect
    Random(RandomEffect),
}

/// Known effect ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EffectId {
    Stop = EFFECT_ID_STOP,
    StarsFadeIn = EFFECT_ID_STARS_FADE_IN,
    StarsBlink = EFFECT_ID_STARS_BLINK,
    StarsFadeOut = EFFECT_ID_STARS_FADE_OUT,
    StarsTwinkle = EFFECT_ID_STARS_TWINKLE,
    StarsGlitter = EFFECT_ID_STARS_GLITTER,
    StarsShooting = EFFECT_ID_STARS_SHOOTING,
    StarsRandom = EFFECT_ID_STARS_RANDOM,
    TopperFadeIn = EFFECT_ID_TOPPER_FADE_IN,
    BallsFadeIn = EFFECT_ID_BALLS_FADE_IN,
    BallsWave = EFFECT_ID_BALLS_WAVE,
    BallsFadeOut = EFFECT_ID_BALLS_FADE_OUT,
    BallsShimmer = EFFECT_ID_BALLS_SHIMMER,
    BallsColorCycle = EFFECT_ID_BALLS_COLOR_CYCLE,
    BallsSnowFall = EFFECT_ID_BALLS_SNOW_FALL,
    BallsGlitter = EFFECT_ID_BALLS_GLITTER,
    BallsRandom = EFFECT_ID_BALLS_RANDOM,
}

impl EffectId {
    /// Instantiate the effect state, with its parameters and successor
    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Stop => EffectSlot::Stop(StopEffect),
            Self::StarsFadeIn => EffectSlot::Fade(FadeEffect::new(
                &STARS_LIST,
                0,
                BR_BASE,
                Duration::from_millis(3000),
                Self::StarsBlink,
            )),
            Self::StarsBlink => EffectSlot::Blink(BlinkEffect::new(
                &STARS_LIST,
                Duration::from_millis(30_000),
                Self::StarsFadeOut,
            )),
            Self::StarsFadeOut => EffectSlot::Fade(FadeEffect::new(
                &STARS_LIST,
                BR_BASE,
                0,
                Duration::from_millis(1000),
                Self::StarsRandom,
            )),
            Self::StarsTwinkle => {
                EffectSlot::Script(ScriptEffect::new(script::stars_twinkle, Self::StarsRandom))
            }
            Self::StarsGlitter => {
                EffectSlot::Script(ScriptEffect::new(script::stars_glitter, Self::StarsRandom))
            }
            Self::StarsShooting => EffectSlot::Shooting(ShootingEffect::new(Self::StarsRandom)),
            Self::StarsRandom => EffectSlot::Random(RandomEffect::new(&STARS_POOL)),
            Self::TopperFadeIn => EffectSlot::Fade(FadeEffect::new(
                &TOPPER_LIST,
                0,
                LEDS_BR_MAX,
                Duration::from_millis(1000),
                Self::Stop,
            )),
            Self::BallsFadeIn => EffectSlot::LineFade(LineFadeEffect::new(
                &BALLS_SWNE_LINE_LIST,
                Duration::from_millis(1500),
                Self::BallsWave,
            )),
            Self::BallsWave => {
                EffectSlot::Wave(WaveEffect::new(&BALLS_SWNE_LINE_LIST, 8, Self::BallsFadeOut))
            }
            Self::BallsFadeOut => EffectSlot::Fade(FadeEffect::new(
                &BALLS_LIST,
                BR_BASE,
                0,
                Duration::from_millis(1000),
                Self::BallsRandom,
            )),
            Self::BallsShimmer => {
                EffectSlot::Script(ScriptEffect::new(script::balls_shimmer, Self::BallsRandom))
            }
            Self::BallsColorCycle => {
                EffectSlot::ColorCycle(ColorCycleEffect::new(Self::BallsRandom))
            }
            Self::BallsSnowFall => EffectSlot::SnowFall(SnowFallEffect::new(Self::BallsRandom)),
            Self::BallsGlitter => {
                EffectSlot::Script(ScriptEffect::new(script::balls_glitter, Self::BallsRandom))
            }
            Self::BallsRandom => EffectSlot::Random(RandomEffect::new(&BALLS_POOL)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stop => EFFECT_NAME_STOP,
            Self::StarsFadeIn => EFFECT_NAME_STARS_FADE_IN,
            Self::StarsBlink => EFFECT_NAME_STARS_BLINK,
            Self::StarsFadeOut => EFFECT_NAME_STARS_FADE_OUT,
            Self::StarsTwinkle => EFFECT_NAME_STARS_TWINKLE,
            Self::StarsGlitter => EFFECT_NAME_STARS_GLITTER,
            Self::StarsShooting => EFFECT_NAME_STARS_SHOOTING,
            Self::StarsRandom => EFFECT_NAME_STARS_RANDOM,
            Self::TopperFadeIn => EFFECT_NAME_TOPPER_FADE_IN,
            Self::BallsFadeIn => EFFECT_NAME_BALLS_FADE_IN,
            Self::BallsWave => EFFECT_NAME_BALLS_WAVE,
            Self::BallsFadeOut => EFFECT_NAME_BALLS_FADE_OUT,
            Self::BallsShimmer => EFFECT_NAME_BALLS_SHIMMER,
            Self::BallsColorCycle => EFFECT_NAME_BALLS_COLOR_CYCLE,
            Self::BallsSnowFall => EFFECT_NAME_BALLS_SNOW_FALL,
            Self::BallsGlitter => EFFECT_NAME_BALLS_GLITTER,
            Self::BallsRandom => EFFECT_NAME_BALLS_RANDOM,
        }
    }
}

impl EffectSlot {
    /// Step the current effect
    pub fn step(
        &mut self,
        first: bool,
        next: &mut EffectId,
        ctx: &mut EffectContext<'_>,
    ) -> Duration {
        match self {
            Self::Stop(effect) => effect.step(first, next, ctx),
            Self::Fade(effect) => effect.step(first, next, ctx),
            Self::LineFade(effect) => effect.step(first, next, ctx),
            Self::Blink(effect) => effect.step(first, next, ctx),
            Self::Wave(effect) => effect.step(first, next, ctx),
            Self::Script(effect) => effect.step(first, next, ctx),
            Self::Shooting(effect) => effect.step(first, next, ctx),
            Self::ColorCycle(effect) => effect.step(first, next, ctx),
            Self::SnowFall(effect) => effect.step(first, next, ctx),
            Self::Random(effect) => effect.step(first, next, ctx),
        }
    }
}
