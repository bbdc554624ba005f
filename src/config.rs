//! Build-time animation configuration

use embassy_time::Duration;

use crate::fx::EffectId;
use crate::topology::{BALLS_LIST, STARS_LIST, TOPPER_LIST};

/// Number of animation threads of the card
pub const THREAD_NUM: usize = 3;

/// Configuration of one animation thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadConfig {
    /// LEDs the thread animates
    pub group: &'static [u8],
    /// Effect started first
    pub effect: EffectId,
    /// Delay before the first effect step
    pub start_delay: Duration,
}

/// Configuration of the card animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimConfig {
    pub stars: ThreadConfig,
    pub topper: ThreadConfig,
    pub balls: ThreadConfig,
}

impl AnimConfig {
    /// Stars fade in first, then the topper lights up, then the balls
    pub const DEFAULT: Self = Self {
        stars: ThreadConfig {
            group: &STARS_LIST,
            effect: EffectId::StarsFadeIn,
            start_delay: Duration::from_millis(0),
        },
        topper: ThreadConfig {
            group: &TOPPER_LIST,
            effect: EffectId::TopperFadeIn,
            start_delay: Duration::from_millis(1000),
        },
        balls: ThreadConfig {
            group: &BALLS_LIST,
            effect: EffectId::BallsFadeIn,
            start_delay: Duration::from_millis(1500),
        },
    };

    /// Thread configurations in scheduling order
    pub const fn threads(&self) -> [ThreadConfig; THREAD_NUM] {
        [self.stars, self.topper, self.balls]
    }
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
