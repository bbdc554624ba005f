//! Shimmering LEDs: a four-segment [`Script`] dimming each LED for a random
//! moment at random intervals

use embassy_time::Duration;

use super::{Script, ScriptSeg};

/// Segments of a shimmering LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ShimmerSeg {
    /// Waiting to be dimmed
    Bright = 0,
    Dimming = 1,
    Dimmed = 2,
    Restoring = 3,
}

/// Number of shimmer segments
const SEG_NUM: usize = 4;

/// Number of dimming/restoring steps, unless the brightness delta is smaller
const DIM_STEP_NUM: u8 = 6;

/// Duration of a full dimming/restoring transition
const DIM_DURATION_MS: u64 = 150;

/// Shimmer parameters
#[derive(Debug, Clone, Copy)]
pub struct Shimmer {
    /// Brightness of non-dimmed LEDs
    pub bright_br: u8,
    /// Maximum bright state delay
    pub bright_delay: Duration,
    /// Brightness of dimmed LEDs
    pub dimmed_br: u8,
    /// Maximum dimmed state delay
    pub dimmed_delay: Duration,
    /// Fade-in/out delay
    pub fade_delay: Duration,
    /// Animation duration excluding fade-in/out, `None` for infinite
    pub duration: Option<Duration>,
}

impl Shimmer {
    /// Build the four shimmer segments
    #[allow(clippy::cast_possible_wrap)]
    pub fn segments(&self) -> [ScriptSeg; SEG_NUM] {
        let delta = self.bright_br.saturating_sub(self.dimmed_br);
        let (step_num, step_off) = if delta >= DIM_STEP_NUM {
            (DIM_STEP_NUM, delta / DIM_STEP_NUM)
        } else if delta > 0 {
            (delta, 1)
        } else {
            (1, 0)
        };
        // Offsets stay within the brightness range, far below i8::MAX
        let step_off = step_off as i8;
        let step_delay = Duration::from_millis(DIM_DURATION_MS / u64::from(step_num));

        let mut segs = [ScriptSeg::fixed(0, 0, step_delay); SEG_NUM];
        segs[ShimmerSeg::Bright as usize] = ScriptSeg::hold(
            Duration::from_millis((self.bright_delay.as_millis() / 8).max(1)),
            self.bright_delay,
        );
        segs[ShimmerSeg::Dimming as usize] = ScriptSeg::fixed(step_num, -step_off, step_delay);
        segs[ShimmerSeg::Dimmed as usize] = ScriptSeg::hold(
            Duration::from_millis((self.dimmed_delay.as_millis() / 4).max(1)),
            self.dimmed_delay,
        );
        segs[ShimmerSeg::Restoring as usize] = ScriptSeg::fixed(step_num, step_off, step_delay);
        segs
    }

    /// Create the shimmering script for a list of LEDs
    pub fn script(&self, leds: &[u8]) -> Script {
        Script::new(
            &self.segments(),
            leds,
            self.bright_br,
            self.fade_delay,
            self.duration,
        )
    }
}
