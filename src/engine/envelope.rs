//! Fade envelope wrapping an effect
//!
//! Ramps the effect in over [`LEDS_BR_NUM`] steps at start and, if the effect
//! has a finite duration, back out over the same number of steps at the end.

use embassy_time::Duration;

use super::{ZERO, elapse};
use crate::brightness::scale_br;
use crate::topology::LEDS_BR_NUM;

#[allow(clippy::cast_possible_truncation)]
const FADE_STEP_NUM: u8 = LEDS_BR_NUM as u8;

/// Shortest fade step
const FADE_STEP_MIN: Duration = Duration::from_millis(1);

/// Fade-in / body / fade-out timeline of an effect
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Delay (duration) of each fade step
    step_delay: Duration,
    /// Fade steps left in the current fade
    steps_left: u8,
    /// Delay left in the current fade step
    step_delay_left: Duration,
    /// Effect body time left, `None` for infinite
    remaining: Option<Duration>,
    /// Fading out (or faded out)
    fading_out: bool,
}

impl Envelope {
    /// Create an envelope fading in (and out) over `fade_delay`, with a body
    /// lasting `duration`, or forever if `None`
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(fade_delay: Duration, duration: Option<Duration>) -> Self {
        let step_delay = Duration::from_millis(fade_delay.as_millis() / u64::from(FADE_STEP_NUM))
            .max(FADE_STEP_MIN);
        Self {
            step_delay,
            steps_left: FADE_STEP_NUM,
            step_delay_left: step_delay,
            remaining: duration,
            fading_out: false,
        }
    }

    /// Advance the timeline by the time elapsed since the previous step
    pub fn elapse(&mut self, elapsed: Duration) {
        if self.steps_left > 0 {
            self.step_delay_left = elapse(self.step_delay_left, elapsed);
            if self.step_delay_left == ZERO {
                self.steps_left -= 1;
                self.step_delay_left = self.step_delay;
                // Zero-length body goes straight into the fade-out
                if self.steps_left == 0 && !self.fading_out && self.remaining == Some(ZERO) {
                    self.start_fade_out();
                }
            }
        } else if let Some(remaining) = self.remaining.filter(|r| *r > ZERO) {
            let remaining = elapse(remaining, elapsed);
            self.remaining = Some(remaining);
            if remaining == ZERO {
                self.start_fade_out();
            }
        }
    }

    fn start_fade_out(&mut self) {
        self.fading_out = true;
        self.steps_left = FADE_STEP_NUM;
        self.step_delay_left = self.step_delay;
    }

    /// Delay until the next fade step or the end of the body
    pub fn next_event(&self) -> Duration {
        if self.steps_left > 0 {
            self.step_delay_left
        } else {
            match self.remaining {
                Some(remaining) if !self.fading_out && remaining > ZERO => remaining,
                _ => Duration::MAX,
            }
        }
    }

    /// Apply the envelope to a nominal brightness
    pub fn apply(&self, br: u8) -> u8 {
        let num = u32::from(FADE_STEP_NUM);
        let left = u32::from(self.steps_left);
        match (self.fading_out, left) {
            (false, 0) => br,
            (false, _) => scale_br(br, num - left + 1, num),
            (true, 0) => 0,
            (true, _) => scale_br(br, left - 1, num),
        }
    }

    /// Check if the envelope is fading in or out
    pub const fn is_fading(&self) -> bool {
        self.steps_left > 0
    }

    /// Check if the step scheduled with `delay` is the last one: the
    /// fade-out reaches zero when it takes effect
    pub fn is_last(&self, delay: Duration) -> bool {
        self.fading_out && self.steps_left == 1 && self.step_delay_left == delay
    }

    /// Check if the fade-out has completed
    pub const fn is_done(&self) -> bool {
        self.fading_out && self.steps_left == 0
    }

    /// Delay of each fade step
    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }
}
