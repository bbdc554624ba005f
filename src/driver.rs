//! Shift-register output over SPI with a load-enable strobe

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::PwmOutput;
use crate::output::PhaseFrame;

/// Error raised by [`SpiPwmOutput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<S, P> {
    /// The SPI transfer failed
    Spi(S),
    /// Driving the load-enable pin failed
    Pin(P),
}

/// Drives the LED shift-register chain.
///
/// The SPI bus and the load-enable pin come configured from board
/// bring-up; this type only shifts data and strobes the latch.
pub struct SpiPwmOutput<S, P> {
    spi: S,
    le: P,
}

impl<S, P> SpiPwmOutput<S, P>
where
    S: SpiBus<u8>,
    P: OutputPin,
{
    pub const fn new(spi: S, le: P) -> Self {
        Self { spi, le }
    }

    /// Release the SPI bus and the load-enable pin
    pub fn release(self) -> (S, P) {
        (self.spi, self.le)
    }
}

impl<S, P> PwmOutput for SpiPwmOutput<S, P>
where
    S: SpiBus<u8>,
    P: OutputPin,
{
    type Error = DriverError<S::Error, P::Error>;

    fn send(&mut self, frame: &PhaseFrame) -> Result<(), Self::Error> {
        // Keep the outputs while shifting
        self.le.set_low().map_err(DriverError::Pin)?;
        self.spi.write(frame).map_err(DriverError::Spi)
    }

    fn load(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(DriverError::Spi)?;
        self.le.set_high().map_err(DriverError::Pin)
    }
}
