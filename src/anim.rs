//! Animation scheduler
//!
//! Each LED group runs its own chain of effects on an animation thread.
//! Threads are stepped cooperatively: every scheduler step advances all
//! threads by the delay returned from the previous step, runs the ones that
//! are due and returns the delay until the next one is.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::brightness::Brightness;
use crate::config::{AnimConfig, THREAD_NUM, ThreadConfig};
use crate::engine::{ZERO, elapse};
use crate::fx::{EffectContext, EffectId, EffectSlot, PickHistory};

/// Effect chain running on one LED group
#[derive(Debug, Clone)]
pub struct AnimThread {
    group: &'static [u8],
    id: EffectId,
    slot: EffectSlot,
    /// The next call is the first one of the current effect
    first: bool,
    /// Delay left until the next call
    delay: Duration,
    history: PickHistory,
    /// Ran during the last scheduler step
    ran: bool,
}

impl AnimThread {
    pub fn new(group: &'static [u8], id: EffectId, start_delay: Duration) -> Self {
        Self {
            group,
            id,
            slot: id.to_slot(),
            first: true,
            delay: start_delay,
            history: PickHistory::default(),
            ran: false,
        }
    }

    pub fn from_config(config: &ThreadConfig) -> Self {
        Self::new(config.group, config.effect, config.start_delay)
    }

    /// LEDs animated by the thread
    pub const fn group(&self) -> &'static [u8] {
        self.group
    }

    /// Effect currently running
    pub const fn effect(&self) -> EffectId {
        self.id
    }

    /// Delay left until the thread runs again
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Check if the thread ran during the last scheduler step
    pub const fn ran(&self) -> bool {
        self.ran
    }

    fn run(&mut self, leds: &mut Brightness, rng: &mut fastrand::Rng) {
        let mut next = self.id;
        let mut ctx = EffectContext {
            leds,
            rng,
            history: &mut self.history,
        };
        self.delay = self.slot.step(self.first, &mut next, &mut ctx);
        self.ran = true;

        self.first = next != self.id;
        if self.first {
            #[cfg(feature = "esp32-log")]
            println!("[anim] {} -> {}", self.id.as_str(), next.as_str());

            self.id = next;
            self.slot = next.to_slot();
        }
    }
}

/// Cooperative scheduler of a fixed set of animation threads
#[derive(Debug, Clone)]
pub struct Anim<const N: usize = THREAD_NUM> {
    threads: [AnimThread; N],
    /// Delay returned by the previous step
    delay: Duration,
}

impl Anim<THREAD_NUM> {
    /// Create the card threads: stars, topper and balls
    pub fn from_config(config: &AnimConfig) -> Self {
        Self::new(config.threads().map(|thread| AnimThread::from_config(&thread)))
    }
}

impl<const N: usize> Anim<N> {
    pub const fn new(threads: [AnimThread; N]) -> Self {
        Self {
            threads,
            delay: ZERO,
        }
    }

    /// Advance all threads by the previously returned delay and run the due
    /// ones, until none is due. Returns the delay until the next thread is.
    ///
    /// Effects write into `leds` the brightness that should be shown once
    /// the returned delay has elapsed.
    pub fn step(&mut self, leds: &mut Brightness, rng: &mut fastrand::Rng) -> Duration {
        let elapsed = self.delay;
        for thread in &mut self.threads {
            thread.delay = elapse(thread.delay, elapsed);
            thread.ran = false;
        }

        loop {
            let mut delay = Duration::MAX;
            for thread in &mut self.threads {
                if thread.delay == ZERO {
                    thread.run(leds, rng);
                }
                delay = delay.min(thread.delay);
            }
            // Zero delays hand over within the same step
            if delay > ZERO {
                self.delay = delay;
                return delay;
            }
        }
    }

    pub fn threads(&self) -> &[AnimThread; N] {
        &self.threads
    }

    /// Groups of the threads which ran during the last step
    pub fn changed_groups(&self) -> impl Iterator<Item = &'static [u8]> + '_ {
        self.threads
            .iter()
            .filter(|thread| thread.ran)
            .map(|thread| thread.group)
    }
}
