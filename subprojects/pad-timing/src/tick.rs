//! Monotonic tick source and deadline-checked waits.
//!
//! The waveform is scheduled by comparing a free-running monotonic counter
//! against absolute deadlines derived from the cycle start, never by counting
//! instructions, so the bus timing is independent of surrounding code speed.
//!
//! ## References
//! - <https://github.com/switchbrew/libnx/blob/master/nx/include/switch/arm/counter.h>

/// A free-running monotonic counter.
///
/// Implementations read a hardware counter (a CPU cycle counter, a timer
/// peripheral) that never goes backwards and never stops while the decode
/// path runs. Reading must be cheap: the bus driver reads it in a busy-wait.
pub trait TickSource {
    /// Returns the current counter value, in raw ticks.
    fn now(&self) -> u64;

    /// Returns the counter frequency, in ticks per second.
    fn ticks_per_second(&self) -> u64;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    #[inline]
    fn now(&self) -> u64 {
        (**self).now()
    }

    #[inline]
    fn ticks_per_second(&self) -> u64 {
        (**self).ticks_per_second()
    }
}

/// A deadline was reached too late to act on it.
///
/// Reported by [`wait_until`] when the counter had already advanced more
/// than `grace` ticks past the deadline by the time the wait completed. The
/// action scheduled for that deadline must not be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline missed by {overshoot} ticks")]
pub struct DeadlineMissed {
    /// How far past the deadline the counter was, in ticks.
    pub overshoot: u64,
}

/// Busy-waits until the counter reaches `deadline`.
///
/// Returns the observed counter value at completion, which is at or past
/// `deadline` by at most `grace` ticks. If the counter has already overshot
/// the deadline by more than `grace` ticks (the caller was held up, or the
/// wait itself was preempted), the wait fails and the cycle must be
/// abandoned.
///
/// The wait is bounded: it can last at most `deadline - now` counter ticks.
pub fn wait_until<T>(ticks: &T, deadline: u64, grace: u64) -> Result<u64, DeadlineMissed>
where
    T: TickSource + ?Sized,
{
    let mut now = ticks.now();
    while now < deadline {
        now = ticks.now();
    }

    let overshoot = now - deadline;
    if overshoot > grace {
        return Err(DeadlineMissed { overshoot });
    }

    Ok(now)
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    /// Counter that advances by a fixed step on every read.
    struct StepCounter {
        now: Cell<u64>,
        step: u64,
    }

    impl StepCounter {
        fn starting_at(start: u64, step: u64) -> Self {
            Self {
                now: Cell::new(start),
                step,
            }
        }
    }

    impl TickSource for StepCounter {
        fn now(&self) -> u64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }

        fn ticks_per_second(&self) -> u64 {
            1_000_000
        }
    }

    #[test]
    fn waits_to_the_exact_deadline() {
        let counter = StepCounter::starting_at(100, 1);
        let arrived = wait_until(&counter, 112, 6).unwrap();
        assert_eq!(arrived, 112);
    }

    #[test]
    fn tolerates_overshoot_within_grace() {
        // Steps of 5 land at 110, 2 ticks past the deadline.
        let counter = StepCounter::starting_at(100, 5);
        let arrived = wait_until(&counter, 108, 6).unwrap();
        assert_eq!(arrived, 110);
    }

    #[test]
    fn rejects_a_deadline_already_long_gone() {
        let counter = StepCounter::starting_at(200, 1);
        let err = wait_until(&counter, 112, 6).unwrap_err();
        assert_eq!(err, DeadlineMissed { overshoot: 88 });
    }

    #[test]
    fn a_past_deadline_returns_without_spinning() {
        // Within grace: already past the deadline, returns immediately.
        let counter = StepCounter::starting_at(115, 1);
        let arrived = wait_until(&counter, 112, 6).unwrap();
        assert_eq!(arrived, 115);
    }
}
