//! Scripted LED animation.
//!
//! Every animated LED independently cycles through a list of segments, each
//! made of a number of equal steps changing the brightness by a fixed
//! offset. Step counts and step delays may be given as ranges, drawn anew
//! for each LED every time it starts a cycle. The whole animation is wrapped
//! into an [`Envelope`], fading in and out while animating.

use embassy_time::Duration;
use heapless::Vec;

use super::{Envelope, ZERO, elapse, random_count, random_duration};
use crate::brightness::{Brightness, offset_br};
use crate::topology::GROUP_MAX;

/// Maximum number of segments in a script
pub const SEG_MAX: usize = 6;

/// Script segment description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSeg {
    /// Minimum number of steps
    pub step_num_min: u8,
    /// Maximum number of steps
    pub step_num_max: u8,
    /// Brightness offset of each step
    pub step_br_off: i8,
    /// Minimum step delay
    pub step_delay_min: Duration,
    /// Maximum step delay
    pub step_delay_max: Duration,
}

impl ScriptSeg {
    /// Segment with a fixed number of steps and a fixed step delay
    pub const fn fixed(step_num: u8, step_br_off: i8, step_delay: Duration) -> Self {
        Self {
            step_num_min: step_num,
            step_num_max: step_num,
            step_br_off,
            step_delay_min: step_delay,
            step_delay_max: step_delay,
        }
    }

    /// Single step holding the brightness for a random delay
    pub const fn hold(delay_min: Duration, delay_max: Duration) -> Self {
        Self {
            step_num_min: 1,
            step_num_max: 1,
            step_br_off: 0,
            step_delay_min: delay_min,
            step_delay_max: delay_max,
        }
    }

    /// Check if going through this segment always takes some time
    fn always_advances(&self) -> bool {
        self.step_num_min.min(self.step_num_max) > 0
            && self.step_delay_min.min(self.step_delay_max) > ZERO
    }
}

/// Per-LED segment timing, redrawn on every cycle
#[derive(Debug, Clone, Copy)]
struct LedSeg {
    step_num: u8,
    step_delay: Duration,
}

impl LedSeg {
    const EMPTY: Self = Self {
        step_num: 0,
        step_delay: ZERO,
    };

    fn generate(seg: &ScriptSeg, rng: &mut fastrand::Rng) -> Self {
        Self {
            step_num: random_count(rng, seg.step_num_min, seg.step_num_max),
            step_delay: random_duration(rng, seg.step_delay_min, seg.step_delay_max),
        }
    }
}

/// State of an animated LED
#[derive(Debug, Clone)]
struct ScriptLed {
    idx: u8,
    segs: [LedSeg; SEG_MAX],
    seg_idx: usize,
    /// Steps left in the current segment
    steps_left: u8,
    /// Delay left in the current step
    delay_left: Duration,
    /// Nominal brightness in effect
    br: u8,
    /// Nominal brightness once the current step takes effect
    next_br: u8,
}

/// Result of a script step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    /// Delay after which the written brightness should take effect
    pub delay: Duration,
    /// The script has scheduled its final, faded-out step
    pub last: bool,
}

/// State of a scripted animation
#[derive(Debug, Clone)]
pub struct Script {
    segs: Vec<ScriptSeg, SEG_MAX>,
    leds: Vec<ScriptLed, GROUP_MAX>,
    envelope: Envelope,
    /// Segments can advance at all
    animated: bool,
    /// Delay scheduled by the previous step
    delay: Duration,
}

impl Script {
    /// Create a script animating `leds` through `segs`, starting from
    /// brightness `br`, fading in and out over `fade_delay` and lasting
    /// `duration` in between, or forever if `None`.
    ///
    /// Extra segments beyond [`SEG_MAX`] and LEDs beyond [`GROUP_MAX`] are
    /// ignored.
    pub fn new(
        segs: &[ScriptSeg],
        leds: &[u8],
        br: u8,
        fade_delay: Duration,
        duration: Option<Duration>,
    ) -> Self {
        let segs: Vec<ScriptSeg, SEG_MAX> = segs.iter().copied().take(SEG_MAX).collect();
        let last_seg = segs.len().saturating_sub(1);
        let leds = leds
            .iter()
            .take(GROUP_MAX)
            .map(|&idx| ScriptLed {
                idx,
                segs: [LedSeg::EMPTY; SEG_MAX],
                // Position at the end of the cycle
                seg_idx: last_seg,
                steps_left: 0,
                delay_left: ZERO,
                br,
                next_br: br,
            })
            .collect();
        let animated = segs.iter().any(ScriptSeg::always_advances);

        Self {
            segs,
            leds,
            envelope: Envelope::new(fade_delay, duration),
            animated,
            delay: ZERO,
        }
    }

    /// Advance the script by the delay returned from the previous step,
    /// write the brightness to take effect next, and return the delay after
    /// which it should.
    pub fn step(&mut self, rng: &mut fastrand::Rng, out: &mut Brightness) -> ScriptStep {
        let elapsed = self.delay;
        self.envelope.elapse(elapsed);

        // Advance every LED and find the nearest change
        let mut delay = Duration::MAX;
        for led in &mut self.leds {
            if !self.animated {
                break;
            }
            led.delay_left = elapse(led.delay_left, elapsed);

            while led.delay_left == ZERO {
                while led.steps_left == 0 {
                    if led.seg_idx + 1 >= self.segs.len() {
                        // Cycle is over, draw new timings and restart
                        for (led_seg, seg) in led.segs.iter_mut().zip(&self.segs) {
                            *led_seg = LedSeg::generate(seg, rng);
                        }
                        led.seg_idx = 0;
                    } else {
                        led.seg_idx += 1;
                    }
                    led.steps_left = led.segs[led.seg_idx].step_num;
                }
                led.steps_left -= 1;
                led.delay_left = led.segs[led.seg_idx].step_delay;
                led.next_br = offset_br(led.next_br, self.segs[led.seg_idx].step_br_off);
            }

            delay = delay.min(led.delay_left);
        }
        delay = delay.min(self.envelope.next_event());

        // Schedule the LEDs changing next
        for led in &mut self.leds {
            if led.delay_left == delay {
                led.br = led.next_br;
            }
            out.set(led.idx, self.envelope.apply(led.br));
        }

        self.delay = delay;
        ScriptStep {
            delay,
            last: self.envelope.is_last(delay),
        }
    }

    /// Fade envelope of the script
    pub const fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}
