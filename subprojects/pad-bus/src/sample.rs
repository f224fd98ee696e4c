//! Data line sampling.

use embedded_hal::digital::InputPin;

use crate::pins::LineFault;

/// Exclusive owner of the bus's data line.
pub struct BitSampler<D> {
    data: D,
}

impl<D> BitSampler<D>
where
    D: InputPin,
{
    pub(crate) fn new(data: D) -> Self {
        Self { data }
    }

    /// Reads the data line's current level (`true` = high = released).
    ///
    /// The caller is responsible for invoking this right after the edge the
    /// bit is valid on, and for checking the capture delay against the
    /// budget; the sampler itself is a plain level read.
    #[inline]
    pub fn capture(&mut self) -> Result<bool, LineFault> {
        self.data.is_high().map_err(|_| LineFault::Data)
    }
}
