//! The card: animation, brightness and rendering wired together.
//!
//! Runs on the main loop, against a [`PwmBanks`] shared with the timer
//! interrupt:
//!
//! ```ignore
//! static BANKS: PwmBanks = PwmBanks::new();
//!
//! let mut card = Card::new(&AnimConfig::DEFAULT, seed);
//! card.start(&BANKS);
//! // start the timer interrupt calling PwmStreamer::on_tick(&BANKS, ..)
//! loop {
//!     card.prepare(&BANKS);
//! }
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::anim::Anim;
use crate::brightness::Brightness;
use crate::config::{AnimConfig, THREAD_NUM};
use crate::output::{PwmBanks, SWAP_LAG_WINDOW, duration_to_ticks};
use crate::renderer::Renderer;

pub struct Card {
    leds: Brightness,
    rng: fastrand::Rng,
    anim: Anim,
    /// Tick of the last requested swap
    target: u32,
    /// Threads which ran during the previous step
    stale: [bool; THREAD_NUM],
}

impl Card {
    /// Create a card with its PRNG seeded once
    pub fn new(config: &AnimConfig, seed: u64) -> Self {
        Self {
            leds: Brightness::new(),
            rng: fastrand::Rng::with_seed(seed),
            anim: Anim::from_config(config),
            target: 0,
            stale: [false; THREAD_NUM],
        }
    }

    /// Render the initial frame into both banks and make it active.
    /// Call before the timer interrupt starts.
    pub fn start(&mut self, banks: &PwmBanks) {
        let renderer = Renderer::new(banks);
        renderer.render(&self.leds);
        banks.swap_now();
        renderer.render(&self.leds);
        self.target = banks.now();
    }

    /// Step the animation, render the result into the inactive bank and
    /// request it to be shown once the step delay has elapsed since the
    /// previous request.
    ///
    /// Returns the swap target tick, or `None` if the previous swap is still
    /// pending and the inactive bank must not be touched.
    pub fn prepare(&mut self, banks: &PwmBanks) -> Option<u32> {
        if banks.is_swap_pending() {
            return None;
        }

        let delay = self.anim.step(&mut self.leds, &mut self.rng);

        // The inactive bank still holds the frame before the previous one
        let renderer = Renderer::new(banks);
        for (thread, stale) in self.anim.threads().iter().zip(&mut self.stale) {
            if thread.ran() || *stale {
                renderer.render_list(&self.leds, thread.group());
            }
            *stale = thread.ran();
        }

        let ticks = duration_to_ticks(delay).min(SWAP_LAG_WINDOW - 1);
        self.target = self.target.wrapping_add(ticks);

        #[cfg(feature = "esp32-log")]
        if banks.now().wrapping_sub(self.target) < SWAP_LAG_WINDOW {
            println!("[card] late frame, target {} now {}", self.target, banks.now());
        }

        banks.request_swap(self.target);
        Some(self.target)
    }

    /// Brightness written by the last step
    pub const fn leds(&self) -> &Brightness {
        &self.leds
    }

    pub const fn anim(&self) -> &Anim {
        &self.anim
    }
}
