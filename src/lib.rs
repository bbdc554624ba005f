#![no_std]

pub mod anim;
pub mod brightness;
pub mod card;
pub mod config;
pub mod driver;
pub mod engine;
pub mod fx;
pub mod output;
pub mod renderer;
pub mod topology;

pub use anim::{Anim, AnimThread};
pub use brightness::Brightness;
pub use card::Card;
pub use config::{AnimConfig, THREAD_NUM, ThreadConfig};
pub use driver::{DriverError, SpiPwmOutput};
pub use fx::{EffectContext, EffectId, EffectSlot, PickHistory};
pub use output::{PhaseFrame, PwmBanks, PwmStreamer};
pub use renderer::{Renderer, pulse_length};

pub use embassy_time::Duration;
pub use fastrand::Rng;

/// Abstract shift-register output
///
/// Implement this trait to support different hardware platforms.
/// The timer interrupt loop is generic over this trait.
pub trait PwmOutput {
    type Error;

    /// Shift out the LED states of one PWM phase, without latching them
    fn send(&mut self, frame: &PhaseFrame) -> Result<(), Self::Error>;

    /// Latch the last shifted states onto the LED outputs
    fn load(&mut self) -> Result<(), Self::Error>;
}
