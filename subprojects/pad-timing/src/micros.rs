//! Microsecond type

use core::{fmt, ops::Add};

use static_assertions::const_assert_eq;

/// A duration expressed in whole microseconds, stored as a `u32`.
///
/// The bus protocol is specified entirely in microseconds (pulse widths of
/// 6 and 12 µs, a cadence of 16 667 µs), so sub-microsecond resolution is
/// never needed on the protocol side. Conversion to hardware counter ticks
/// happens at the last possible moment via [`to_ticks`](Self::to_ticks).
///
/// The type is `#[repr(transparent)]`, so it has the same ABI layout as its
/// inner `u32`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Microseconds(u32);

// Asserts that the size of the type is the same as the size of the inner type
const_assert_eq!(size_of::<Microseconds>(), size_of::<u32>());

impl Microseconds {
    /// The zero value for this type.
    pub const ZERO: Self = Microseconds(0);

    /// Constructs a duration from a whole number of microseconds.
    #[inline]
    pub const fn new(us: u32) -> Self {
        Microseconds(us)
    }

    /// Returns the duration as a whole number of microseconds.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Converts the duration to ticks of a counter running at `hz` ticks per
    /// second.
    ///
    /// Rounds up, so that a wait derived from this value never undershoots
    /// the real duration and a budget derived from it is never understated.
    #[inline]
    pub const fn to_ticks(self, hz: u64) -> u64 {
        let ns_product = self.0 as u64 * hz;
        ns_product.div_ceil(1_000_000)
    }
}

impl Add for Microseconds {
    type Output = Microseconds;

    #[inline]
    fn add(self, rhs: Microseconds) -> Microseconds {
        Microseconds(self.0 + rhs.0)
    }
}

impl fmt::Debug for Microseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

impl fmt::Display for Microseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_conversion_at_one_megahertz() {
        // 1 MHz counter: one tick per microsecond.
        assert_eq!(Microseconds::new(12).to_ticks(1_000_000), 12);
        assert_eq!(Microseconds::new(16_667).to_ticks(1_000_000), 16_667);
    }

    #[test]
    fn conversion_rounds_up() {
        // 3 Hz counter: 1 us is a fraction of a tick and must round to 1.
        assert_eq!(Microseconds::new(1).to_ticks(3), 1);
        // 19.2 MHz (the usual ARM system counter): 6 us = 115.2 ticks.
        assert_eq!(Microseconds::new(6).to_ticks(19_200_000), 116);
    }

    #[test]
    fn zero_is_zero_at_any_rate() {
        assert_eq!(Microseconds::ZERO.to_ticks(19_200_000), 0);
        assert_eq!(Microseconds::ZERO.get(), 0);
    }

    #[test]
    fn add_sums_microseconds() {
        let total = Microseconds::new(6) + Microseconds::new(6);
        assert_eq!(total, Microseconds::new(12));
    }
}
