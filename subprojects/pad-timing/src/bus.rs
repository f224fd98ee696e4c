//! Bus timing constants.
//!
//! The documented waveform for one poll cycle, all values in microseconds:
//!
//! ```text
//! latch  ___/¯¯¯¯¯¯¯¯¯¯¯¯\_______________________________________________
//!            |<-- 12 -->|<- 6 ->|
//! clock  ¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯\__6__/¯¯6¯¯\__6__/¯¯6¯¯ ... (x16) ¯¯¯¯¯¯
//! data       b1 valid at latch fall; b(k+1) valid at rising edge of pulse k
//! ```
//!
//! The cycle repeats every 16.67 ms (60 Hz). The clock line idles high
//! between cycles; the latch line idles low.
//!
//! ## References
//! - <https://www.repairfaq.org/REPAIR/F_SNES.html>

use static_assertions::const_assert;

use crate::Microseconds;

/// Width of the high pulse on the latch line.
pub const LATCH_PULSE_WIDTH: Microseconds = Microseconds::new(12);

/// Gap between the latch pulse's falling edge and the first clock pulse.
pub const LATCH_TO_CLOCK_GAP: Microseconds = Microseconds::new(6);

/// Duration of each half of a clock pulse (low phase and high phase).
pub const CLOCK_HALF_PERIOD: Microseconds = Microseconds::new(6);

/// Full width of one clock pulse.
pub const CLOCK_PULSE_WIDTH: Microseconds = Microseconds::new(12);

/// Number of clock pulses per poll cycle.
pub const CLOCK_PULSE_COUNT: u32 = 16;

/// Interval between poll cycles (60 Hz cadence).
pub const POLL_PERIOD: Microseconds = Microseconds::new(16_667);

/// Nominal polling frequency, in cycles per second.
pub const POLL_HZ: u32 = 60;

/// Maximum tolerated lateness for an edge or a capture.
///
/// Derived from the clock half-period: an action more than half a clock
/// phase late can no longer be attributed to the intended edge.
pub const LATENESS_BUDGET: Microseconds = CLOCK_HALF_PERIOD;

/// Active length of one cycle's waveform, from latch rise to the final
/// clock pulse returning the line to idle.
pub const CYCLE_ACTIVE_LENGTH: Microseconds = Microseconds::new(
    LATCH_PULSE_WIDTH.get() + LATCH_TO_CLOCK_GAP.get() + CLOCK_PULSE_COUNT * CLOCK_PULSE_WIDTH.get(),
);

// The two clock phases make up one pulse.
const_assert!(CLOCK_HALF_PERIOD.get() * 2 == CLOCK_PULSE_WIDTH.get());

// The waveform must fit in its period with room to spare.
const_assert!(CYCLE_ACTIVE_LENGTH.get() < POLL_PERIOD.get());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_lasts_210_microseconds() {
        assert_eq!(CYCLE_ACTIVE_LENGTH, Microseconds::new(210));
    }

    #[test]
    fn poll_period_approximates_60_hz() {
        // 1s / 60 = 16666.67 us; the documented cadence rounds to 16.67 ms.
        let period_from_rate = 1_000_000 / POLL_HZ;
        assert!(POLL_PERIOD.get().abs_diff(period_from_rate) <= 1);
    }
}
