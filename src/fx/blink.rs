//! Random star blinking
//!
//! A fixed number of slots each pick a random LED, wait a random time, dim
//! it in two steps, restore it in two steps and rest until the slot's cycle
//! is over.

use embassy_time::Duration;

use super::{BR_BASE, Effect, EffectContext, EffectId};
use crate::brightness::br_frac;
use crate::engine::{ZERO, elapse};

/// Number of LEDs blinking at once
const SLOT_NUM: usize = 8;

/// Length of a slot cycle, in ms
const CYCLE_MS: u64 = 0x2000;

/// State of a blinking slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum BlinkState {
    /// Waiting to be dimmed
    Wait = 0,
    /// Dimming, half-dimmed
    Dimmer = 1,
    /// Fully dimmed
    Dim = 2,
    /// Restoring, half-brightened
    Restoring = 3,
    /// Restored, resting
    Restored = 4,
}

const STATE_NUM: usize = 5;

impl BlinkState {
    /// Brightness once the state is over
    const fn next_br(self) -> u8 {
        match self {
            Self::Wait | Self::Dim => br_frac(5, 8),
            Self::Dimmer => br_frac(1, 2),
            Self::Restoring | Self::Restored => BR_BASE,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Wait => Self::Dimmer,
            Self::Dimmer => Self::Dim,
            Self::Dim => Self::Restoring,
            Self::Restoring | Self::Restored => Self::Restored,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BlinkSlot {
    led: u8,
    state: BlinkState,
    delays: [Duration; STATE_NUM],
    /// No longer starting cycles
    idle: bool,
}

impl BlinkSlot {
    const RESTORED: Self = Self {
        led: 0,
        state: BlinkState::Restored,
        delays: [ZERO; STATE_NUM],
        idle: false,
    };

    fn delay_left(&self) -> Duration {
        self.delays[self.state as usize]
    }

    /// Pick an LED and draw the timings of a new cycle
    fn start(&mut self, list: &[u8], rng: &mut fastrand::Rng) {
        self.led = list[rng.usize(..list.len())];
        let wait = u64::from(rng.u8(..16)) << 9;
        self.delays = [
            Duration::from_millis(wait),
            Duration::from_millis(0x80),
            Duration::from_millis(0x100),
            Duration::from_millis(0x80),
            Duration::from_millis(CYCLE_MS - wait),
        ];
        self.state = BlinkState::Wait;
    }
}

/// Blink random LEDs of a group for a while
#[derive(Debug, Clone)]
pub struct BlinkEffect {
    list: &'static [u8],
    duration: Duration,
    then: EffectId,
    slots: [BlinkSlot; SLOT_NUM],
    /// Time left to start new cycles
    remaining: Duration,
    /// Delay returned by the previous step
    delay: Duration,
}

impl BlinkEffect {
    pub fn new(list: &'static [u8], duration: Duration, then: EffectId) -> Self {
        Self {
            list,
            duration,
            then,
            slots: [BlinkSlot::RESTORED; SLOT_NUM],
            remaining: duration,
            delay: ZERO,
        }
    }
}

impl Effect for BlinkEffect {
    fn step(&mut self, first: bool, next: &mut EffectId, ctx: &mut EffectContext<'_>) -> Duration {
        if first {
            self.slots = [BlinkSlot::RESTORED; SLOT_NUM];
            self.remaining = self.duration;
            self.delay = ZERO;
        }

        if self.list.is_empty() {
            *next = self.then;
            return ZERO;
        }

        let elapsed = self.delay;
        self.remaining = elapse(self.remaining, elapsed);

        // Advance every slot
        let mut delay = Duration::MAX;
        for slot in &mut self.slots {
            if slot.idle {
                continue;
            }
            let state = slot.state as usize;
            slot.delays[state] = elapse(slot.delays[state], elapsed);

            while slot.delay_left() == ZERO {
                if slot.state == BlinkState::Restored {
                    if self.remaining == ZERO {
                        slot.idle = true;
                        break;
                    }
                    slot.start(self.list, ctx.rng);
                } else {
                    // Show the state's brightness even if it lasted no time
                    ctx.leds.set(slot.led, slot.state.next_br());
                    slot.state = slot.state.next();
                }
            }

            if !slot.idle {
                delay = delay.min(slot.delay_left());
            }
        }

        if delay == Duration::MAX {
            // Every slot has finished its last cycle
            ctx.leds.fill(self.list, BR_BASE);
            *next = self.then;
            self.delay = ZERO;
            return ZERO;
        }

        // Schedule the slots changing next
        for slot in &self.slots {
            if !slot.idle && slot.delay_left() == delay {
                ctx.leds.set(slot.led, slot.state.next_br());
            }
        }

        self.delay = delay;
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_dims_in_two_steps_and_restores() {
        let mut state = BlinkState::Wait;
        let mut levels = [0; 4];
        for level in &mut levels {
            *level = state.next_br();
            state = state.next();
        }
        assert_eq!(levels, [39, 31, 39, 47]);
        assert_eq!(state, BlinkState::Restored);
        assert_eq!(state.next_br(), BR_BASE);
    }
}
