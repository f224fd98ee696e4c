//! One full latch/clock/sample cycle.

use embedded_hal::digital::{InputPin, OutputPin};
use pad_protocol::{IncompleteFrame, RawSampleBuffer, SampleFrame};
use pad_timing::{DeadlineMissed, Microseconds, TickSource, bus, wait_until};

use crate::{
    pins::{BusPinSet, LineFault},
    pulse::PulseGenerator,
    sample::BitSampler,
};

/// A poll cycle was abandoned before producing a complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusCycleError {
    /// A pulse edge could not be driven within its lateness budget.
    #[error("pulse edge {0}")]
    Deadline(#[from] DeadlineMissed),
    /// A data capture completed too long after its triggering edge to be
    /// attributable to the right bit.
    #[error("bit {bit} was not captured within its budget")]
    CaptureOverrun { bit: u8 },
    /// The cycle ended with fewer than 16 bits in the buffer.
    #[error(transparent)]
    Short(#[from] IncompleteFrame),
    /// A bus line could not be driven or read.
    #[error(transparent)]
    Line(#[from] LineFault),
}

/// The bus driver: pulse generator, bit sampler, and the monotonic counter
/// that schedules them.
///
/// One [`run_cycle`](Self::run_cycle) call executes exactly one cycle of the
/// documented waveform. Cycles are strictly sequential; the driver holds no
/// state between them beyond the idle line levels.
pub struct SnesBus<L, C, D, T> {
    pulses: PulseGenerator<L, C>,
    sampler: BitSampler<D>,
    ticks: T,
}

impl<L, C, D, T> SnesBus<L, C, D, T>
where
    L: OutputPin,
    C: OutputPin,
    D: InputPin,
    T: TickSource,
{
    /// Builds the driver from a configured pin set and a tick source.
    pub fn new(pins: BusPinSet<L, C, D>, ticks: T) -> Self {
        let (pulses, sampler) = pins.split();
        Self {
            pulses,
            sampler,
            ticks,
        }
    }

    /// Executes one poll cycle.
    ///
    /// On success returns the 16 captured levels plus the counter value at
    /// latch-pulse start (the frame's capture timestamp). On any violation
    /// the cycle is abandoned immediately — never retried mid-cycle — and
    /// the lines are parked at idle so the next cycle starts clean.
    pub fn run_cycle(&mut self) -> Result<(SampleFrame, u64), BusCycleError> {
        let result = self.drive_waveform();
        if result.is_err() {
            self.pulses.park();
        }
        result
    }

    fn drive_waveform(&mut self) -> Result<(SampleFrame, u64), BusCycleError> {
        let hz = self.ticks.ticks_per_second();
        let budget = bus::LATENESS_BUDGET.to_ticks(hz);
        let mut samples = RawSampleBuffer::new();

        let start = self.ticks.now();
        self.pulses.latch_high()?;

        // The first bit is valid at the latch falling edge, not a clock
        // edge.
        let fall = wait_until(
            &self.ticks,
            start + bus::LATCH_PULSE_WIDTH.to_ticks(hz),
            budget,
        )?;
        self.pulses.latch_low()?;
        self.capture_bit(&mut samples, fall, budget, 1)?;

        for pulse in 1..=bus::CLOCK_PULSE_COUNT {
            // Deadlines are absolute offsets from the cycle start, so
            // jitter in one pulse never accumulates into the next.
            let low_offset = Microseconds::new(
                bus::LATCH_PULSE_WIDTH.get()
                    + bus::LATCH_TO_CLOCK_GAP.get()
                    + (pulse - 1) * bus::CLOCK_PULSE_WIDTH.get(),
            );
            wait_until(&self.ticks, start + low_offset.to_ticks(hz), budget)?;
            self.pulses.clock_low()?;

            let rise_offset = low_offset + bus::CLOCK_HALF_PERIOD;
            let rise = wait_until(&self.ticks, start + rise_offset.to_ticks(hz), budget)?;
            self.pulses.clock_high()?;

            // The rising edge of pulse k shifts bit k+1 onto the data line;
            // the final pulse only returns the line to idle.
            if pulse < bus::CLOCK_PULSE_COUNT {
                self.capture_bit(&mut samples, rise, budget, pulse as u8 + 1)?;
            }
        }

        let frame = samples.finish()?;
        Ok((frame, start))
    }

    /// Captures one bit, checking the delay between the triggering edge and
    /// the completed read against the budget.
    fn capture_bit(
        &mut self,
        samples: &mut RawSampleBuffer,
        edge: u64,
        budget: u64,
        bit: u8,
    ) -> Result<(), BusCycleError> {
        let level = self.sampler.capture()?;
        let done = self.ticks.now();
        if done.saturating_sub(edge) > budget {
            return Err(BusCycleError::CaptureOverrun { bit });
        }
        samples.record(level);
        Ok(())
    }
}
