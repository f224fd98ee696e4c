//! Bus line ownership.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::{pulse::PulseGenerator, sample::BitSampler};

/// A bus line could not be driven or read.
///
/// On most targets the pins are infallible and this never occurs; HALs that
/// can fail (port expanders, remote GPIO) surface their fault here, with the
/// detail reduced to which line misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineFault {
    #[error("latch line fault")]
    Latch,
    #[error("clock line fault")]
    Clock,
    #[error("data line fault")]
    Data,
}

/// The three bus lines, bound to their roles once at startup.
///
/// Owning the pins by value is what enforces the single-driver rule: after
/// [`split`](Self::split) the outputs belong to the pulse generator and the
/// input to the sampler, and no other code can reach the physical lines.
pub struct BusPinSet<L, C, D> {
    latch: L,
    clock: C,
    data: D,
}

impl<L, C, D> BusPinSet<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: InputPin,
{
    /// Binds the lines and drives the outputs to their idle levels (latch
    /// low, clock high).
    pub fn new(mut latch: L, mut clock: C, data: D) -> Result<Self, LineFault> {
        latch.set_low().map_err(|_| LineFault::Latch)?;
        clock.set_high().map_err(|_| LineFault::Clock)?;
        Ok(Self { latch, clock, data })
    }

    /// Splits the set into the two components allowed to touch the bus.
    pub fn split(self) -> (PulseGenerator<L, C>, BitSampler<D>) {
        (
            PulseGenerator::new(self.latch, self.clock),
            BitSampler::new(self.data),
        )
    }
}
