//! Double-buffered PWM frame banks and the timer-driven streaming loop.
//!
//! The main loop renders into the inactive bank and requests a swap at an
//! absolute tick; the timer interrupt streams the active bank one PWM phase
//! at a time and performs the swap at the start of a PWM cycle.
//!
//! Every field is written by exactly one side, so plain atomic loads and
//! stores are enough, even on cores without compare-and-swap.

use portable_atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PwmOutput;
use crate::topology::{LEDS_BR_NUM, LEDS_BYTES, LEDS_NUM};

/// PWM refresh frequency, Hz
pub const PWM_HZ: u32 = 375;

/// Number of PWM phases in one refresh cycle
pub const PWM_PHASES: usize = LEDS_BR_NUM;

/// Timer interrupt frequency: two ticks (send, load) per phase
#[allow(clippy::cast_possible_truncation)]
pub const TICK_HZ: u32 = PWM_HZ * PWM_PHASES as u32 * 2;

/// Timer ticks per millisecond
pub const TICKS_PER_MS: u32 = TICK_HZ / 1000;

/// Timer ticks per PWM refresh cycle
#[allow(clippy::cast_possible_truncation)]
pub const TICKS_PER_CYCLE: u32 = PWM_PHASES as u32 * 2;

/// How far past its target tick a pending swap is still performed.
///
/// Half the counter range: targets further ahead than this are treated as
/// not reached yet, so the comparison survives counter rollover.
pub const SWAP_LAG_WINDOW: u32 = 1 << 31;

const _: () = assert!(TICK_HZ % 1000 == 0);
const _: () = assert!(PWM_PHASES.is_power_of_two());

/// One bank: one bit per LED for each PWM phase
type Bank = [[AtomicU8; LEDS_BYTES]; PWM_PHASES];

/// Bit-pattern of one PWM phase
pub type PhaseFrame = [u8; LEDS_BYTES];

const fn new_bank() -> Bank {
    [const { [const { AtomicU8::new(0) }; LEDS_BYTES] }; PWM_PHASES]
}

/// Two PWM frame banks shared between the main loop and the timer interrupt
pub struct PwmBanks {
    banks: [Bank; 2],
    /// Index of the bank being streamed; written by the interrupt only
    active: AtomicU8,
    /// A swap was requested and not performed yet
    swap_pending: AtomicBool,
    /// Tick at which the pending swap becomes due; written by the main loop
    swap_target: AtomicU32,
    /// Free-running tick counter; written by the interrupt only
    tick: AtomicU32,
}

impl Default for PwmBanks {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmBanks {
    /// Zeroed banks, bank 0 active
    pub const fn new() -> Self {
        Self::with_tick(0)
    }

    /// Zeroed banks with the tick counter starting at `tick`
    pub const fn with_tick(tick: u32) -> Self {
        Self {
            banks: [new_bank(), new_bank()],
            active: AtomicU8::new(0),
            swap_pending: AtomicBool::new(false),
            swap_target: AtomicU32::new(0),
            tick: AtomicU32::new(tick),
        }
    }

    /// Index of the bank being streamed
    pub fn active(&self) -> usize {
        usize::from(self.active.load(Ordering::Acquire) & 1)
    }

    /// Index of the bank available for rendering
    pub fn inactive(&self) -> usize {
        self.active() ^ 1
    }

    /// Current tick count
    pub fn now(&self) -> u32 {
        self.tick.load(Ordering::Relaxed)
    }

    /// Check if a requested swap has not been performed yet
    pub fn is_swap_pending(&self) -> bool {
        self.swap_pending.load(Ordering::Acquire)
    }

    /// Request the inactive bank to become active at the `target` tick.
    ///
    /// The caller must not render again until [`Self::is_swap_pending`]
    /// turns false.
    pub fn request_swap(&self, target: u32) {
        self.swap_target.store(target, Ordering::Relaxed);
        self.swap_pending.store(true, Ordering::Release);
    }

    /// Swap immediately, before the timer interrupt is running
    pub fn swap_now(&self) {
        #[allow(clippy::cast_possible_truncation)]
        self.active.store(self.inactive() as u8, Ordering::Release);
        self.swap_pending.store(false, Ordering::Release);
    }

    /// Read one phase of a bank
    pub fn phase(&self, bank: usize, phase: usize) -> PhaseFrame {
        let mut frame = [0; LEDS_BYTES];
        for (out, byte) in frame.iter_mut().zip(&self.banks[bank & 1][phase]) {
            *out = byte.load(Ordering::Relaxed);
        }
        frame
    }

    /// Check if an LED is lit during a phase of a bank
    pub fn is_lit(&self, bank: usize, phase: usize, led: u8) -> bool {
        debug_assert!((led as usize) < LEDS_NUM);
        let byte = self.banks[bank & 1][phase][led as usize >> 3].load(Ordering::Relaxed);
        byte & (1 << (led & 0x7)) != 0
    }

    /// Number of phases an LED is lit for in a bank
    pub fn pulse_length(&self, bank: usize, led: u8) -> usize {
        (0..PWM_PHASES).filter(|&phase| self.is_lit(bank, phase, led)).count()
    }

    /// Overwrite one phase of the inactive bank
    pub(crate) fn store_phase(&self, phase: usize, frame: &PhaseFrame) {
        let bank = &self.banks[self.inactive()][phase];
        for (byte, value) in bank.iter().zip(frame) {
            byte.store(*value, Ordering::Relaxed);
        }
    }

    /// Set or clear one LED bit in a phase of the inactive bank
    pub(crate) fn store_bit(&self, phase: usize, led: u8, lit: bool) {
        let byte = &self.banks[self.inactive()][phase][led as usize >> 3];
        let mask = 1 << (led & 0x7);
        let value = byte.load(Ordering::Relaxed);
        byte.store(if lit { value | mask } else { value & !mask }, Ordering::Relaxed);
    }

    /// Perform the pending swap if its target tick has been reached
    fn try_swap(&self, tick: u32) -> bool {
        if !self.swap_pending.load(Ordering::Acquire) {
            return false;
        }
        let target = self.swap_target.load(Ordering::Relaxed);
        if tick.wrapping_sub(target) >= SWAP_LAG_WINDOW {
            return false;
        }
        #[allow(clippy::cast_possible_truncation)]
        self.active.store(self.inactive() as u8, Ordering::Release);
        self.swap_pending.store(false, Ordering::Release);
        true
    }
}

/// Timer interrupt state streaming the active bank
#[derive(Debug, Default)]
pub struct PwmStreamer {
    send_errors: u32,
    load_errors: u32,
}

impl PwmStreamer {
    pub const fn new() -> Self {
        Self {
            send_errors: 0,
            load_errors: 0,
        }
    }

    /// Timer interrupt body, call at [`TICK_HZ`].
    ///
    /// Odd ticks latch the phase shifted out on the previous tick. Even
    /// ticks shift out the next phase of the active bank, swapping banks
    /// first when starting a new PWM cycle and a due swap is pending.
    pub fn on_tick<O: PwmOutput>(&mut self, banks: &PwmBanks, output: &mut O) {
        let tick = banks.tick.load(Ordering::Relaxed);

        if tick & 1 == 1 {
            if output.load().is_err() {
                self.load_errors = self.load_errors.wrapping_add(1);
            }
        } else {
            let phase = (tick >> 1) as usize & (PWM_PHASES - 1);
            if phase == 0 && banks.try_swap(tick) {
                #[cfg(feature = "esp32-log")]
                println!("[PwmStreamer] swapped to bank {} at tick {}", banks.active(), tick);
            }
            let frame = banks.phase(banks.active(), phase);
            if output.send(&frame).is_err() {
                self.send_errors = self.send_errors.wrapping_add(1);
            }
        }

        banks.tick.store(tick.wrapping_add(1), Ordering::Relaxed);
    }

    /// Number of failed phase transfers
    pub const fn send_errors(&self) -> u32 {
        self.send_errors
    }

    /// Number of failed load strobes
    pub const fn load_errors(&self) -> u32 {
        self.load_errors
    }
}

/// Convert a delay to timer ticks, saturating
pub fn duration_to_ticks(delay: embassy_time::Duration) -> u32 {
    u32::try_from(delay.as_millis().saturating_mul(u64::from(TICKS_PER_MS))).unwrap_or(u32::MAX)
}
