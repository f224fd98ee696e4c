//! Latch and clock line control.

use embedded_hal::digital::OutputPin;

use crate::pins::LineFault;

/// Exclusive owner of the bus's two driven lines.
///
/// Only exposes single-edge operations; the waveform itself (which edge at
/// which instant) is scheduled by the cycle driver, so every transition is
/// paired with its deadline check in one place.
pub struct PulseGenerator<L, C> {
    latch: L,
    clock: C,
}

impl<L, C> PulseGenerator<L, C>
where
    L: OutputPin,
    C: OutputPin,
{
    pub(crate) fn new(latch: L, clock: C) -> Self {
        Self { latch, clock }
    }

    /// Starts the latch pulse.
    #[inline]
    pub fn latch_high(&mut self) -> Result<(), LineFault> {
        self.latch.set_high().map_err(|_| LineFault::Latch)
    }

    /// Ends the latch pulse.
    #[inline]
    pub fn latch_low(&mut self) -> Result<(), LineFault> {
        self.latch.set_low().map_err(|_| LineFault::Latch)
    }

    /// Drives the clock line low (start of a clock pulse).
    #[inline]
    pub fn clock_low(&mut self) -> Result<(), LineFault> {
        self.clock.set_low().map_err(|_| LineFault::Clock)
    }

    /// Drives the clock line high (rising edge; the bus idles here).
    #[inline]
    pub fn clock_high(&mut self) -> Result<(), LineFault> {
        self.clock.set_high().map_err(|_| LineFault::Clock)
    }

    /// Forces both lines back to their idle levels.
    ///
    /// Used when a cycle is abandoned mid-waveform, so the next cycle starts
    /// from a clean bus no matter where the previous one stopped. Faults are
    /// ignored: the cycle is already failed and there is nothing further to
    /// do about a line that will not move.
    pub fn park(&mut self) {
        let _ = self.latch.set_low();
        let _ = self.clock.set_high();
    }
}
