//! Raw sample accumulation for one poll cycle.

use core::fmt;

/// Number of bits shifted out per poll cycle.
pub const FRAME_BITS: usize = 16;

/// Accumulator for the raw line levels of one in-flight poll cycle.
///
/// Levels are recorded in capture order, electrical polarity untouched
/// (`true` = high = released). The buffer belongs to exactly one cycle: it
/// is created when the cycle starts and consumed by [`finish`](Self::finish)
/// or dropped when the cycle aborts.
#[derive(Debug, Clone)]
pub struct RawSampleBuffer {
    levels: [bool; FRAME_BITS],
    len: usize,
}

impl RawSampleBuffer {
    /// Creates an empty buffer for a new cycle.
    #[inline]
    pub const fn new() -> Self {
        Self {
            levels: [false; FRAME_BITS],
            len: 0,
        }
    }

    /// Records the next sampled level, in capture order.
    ///
    /// Levels past the sixteenth are ignored; the bus driver never produces
    /// them on a well-formed cycle.
    #[inline]
    pub fn record(&mut self, level: bool) {
        debug_assert!(self.len < FRAME_BITS, "more than 16 samples in one cycle");
        if self.len < FRAME_BITS {
            self.levels[self.len] = level;
            self.len += 1;
        }
    }

    /// Number of levels recorded so far.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no levels have been recorded yet.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether all 16 levels of the cycle have been recorded.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.len == FRAME_BITS
    }

    /// Consumes the buffer, yielding a complete frame for decoding.
    ///
    /// Fails if the cycle was aborted before all 16 bits arrived; the error
    /// reports how many were captured.
    pub fn finish(self) -> Result<SampleFrame, IncompleteFrame> {
        if !self.is_complete() {
            return Err(IncompleteFrame {
                captured: self.len as u8,
            });
        }
        Ok(SampleFrame(self.levels))
    }
}

impl Default for RawSampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, ordered set of the 16 raw levels of one poll cycle.
///
/// Completeness is guaranteed by construction; the decoder accepts nothing
/// else, so it never has to handle a short read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFrame([bool; FRAME_BITS]);

impl SampleFrame {
    /// Builds a frame directly from 16 raw levels, earliest first.
    #[inline]
    pub const fn from_levels(levels: [bool; FRAME_BITS]) -> Self {
        SampleFrame(levels)
    }

    /// Raw level at zero-based capture position `pos` (`0` = first bit).
    #[inline]
    pub const fn level(&self, pos: usize) -> bool {
        self.0[pos]
    }
}

impl fmt::Display for SampleFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &level in &self.0 {
            f.write_str(if level { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A cycle ended before all 16 bits were captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("only {captured} of 16 bits captured")]
pub struct IncompleteFrame {
    /// Number of bits captured before the cycle was abandoned.
    pub captured: u8,
}
