//! Cycle scheduling, outcome classification, and publication.

use embedded_hal::digital::{InputPin, OutputPin};
use pad_bus::{BusCycleError, SnesBus};
use pad_protocol::{ButtonState, Trailer, decode};
use pad_sync::Publisher;
use pad_timing::{Microseconds, TickSource, bus};

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle completed and its snapshot was published.
    Decoded(ButtonState),
    /// A pulse or sample deadline was missed, or a line faulted; nothing
    /// was published.
    TimingViolation,
    /// Fewer than 16 bits were captured before the cycle was abandoned;
    /// nothing was published.
    Incomplete,
}

/// Diagnostic counters, one per abnormal condition plus the publish count.
///
/// Saturating: after 2^32 events the counters pin at max rather than wrap,
/// which is the right failure mode for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollStats {
    /// Cycles that completed and published a snapshot.
    pub published: u32,
    /// Cycles abandoned for a missed edge deadline or a line fault.
    pub timing_violations: u32,
    /// Cycles abandoned with fewer than 16 bits captured.
    pub incomplete: u32,
    /// Published cycles whose trailer bits were not idle-high.
    pub trailer_anomalies: u32,
}

/// Drives one bus cycle per timer tick and publishes the result.
///
/// The caller's periodic timer provides the cadence; [`period`](Self::period)
/// exposes the interval the timer must be programmed to. Configuration (pin
/// bindings, tick source, period) is fixed at construction.
///
/// The cycle sequence number advances on every tick, including failed ones,
/// so a consumer comparing sequence numbers against wall clock can detect
/// lost cycles — a persistently stalled sequence number is the external
/// signal for a hardware fault.
pub struct PollScheduler<'a, L, C, D, T> {
    bus: SnesBus<L, C, D, T>,
    publisher: Publisher<'a, ButtonState>,
    period: Microseconds,
    sequence: u64,
    stats: PollStats,
}

impl<'a, L, C, D, T> PollScheduler<'a, L, C, D, T>
where
    L: OutputPin,
    C: OutputPin,
    D: InputPin,
    T: TickSource,
{
    /// Creates a scheduler at the protocol's nominal 60 Hz cadence.
    pub fn new(bus: SnesBus<L, C, D, T>, publisher: Publisher<'a, ButtonState>) -> Self {
        Self::with_period(bus, publisher, bus::POLL_PERIOD)
    }

    /// Creates a scheduler with a non-standard poll period.
    pub fn with_period(
        bus: SnesBus<L, C, D, T>,
        publisher: Publisher<'a, ButtonState>,
        period: Microseconds,
    ) -> Self {
        Self {
            bus,
            publisher,
            period,
            sequence: 0,
            stats: PollStats::default(),
        }
    }

    /// The interval the driving timer must fire at.
    pub fn period(&self) -> Microseconds {
        self.period
    }

    /// The sequence number of the most recent cycle (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Snapshot of the diagnostic counters.
    pub fn stats(&self) -> PollStats {
        self.stats
    }

    /// Runs exactly one poll cycle.
    ///
    /// Always terminates within the cycle period (the waveform is bounded
    /// and every wait in it is deadline-checked) and always yields an
    /// outcome. On `TimingViolation` and `Incomplete` the output slot is
    /// left untouched: the consumer keeps seeing the previous snapshot,
    /// stale-but-valid being preferable to corrupt.
    pub fn poll_tick(&mut self) -> CycleOutcome {
        // Advanced unconditionally, so consumers can detect gaps.
        self.sequence = self.sequence.wrapping_add(1);

        match self.bus.run_cycle() {
            Ok((frame, timestamp)) => {
                let decoded = decode(&frame);
                if decoded.trailer == Trailer::Anomalous {
                    // Not fatal: the buttons decoded fine, but the bus is
                    // noisy or the frame sync is off. Worth a trace.
                    self.stats.trailer_anomalies = self.stats.trailer_anomalies.saturating_add(1);
                    log::warn!("cycle {}: trailer bits not idle, frame {}", self.sequence, frame);
                }

                let state = ButtonState::new(decoded.buttons, self.sequence, timestamp);
                self.publisher.publish(state);
                self.stats.published = self.stats.published.saturating_add(1);
                CycleOutcome::Decoded(state)
            }
            Err(BusCycleError::CaptureOverrun { bit }) => {
                self.stats.incomplete = self.stats.incomplete.saturating_add(1);
                log::warn!("cycle {}: bit {} missed its capture budget", self.sequence, bit);
                CycleOutcome::Incomplete
            }
            Err(BusCycleError::Short(short)) => {
                self.stats.incomplete = self.stats.incomplete.saturating_add(1);
                log::warn!("cycle {}: {}", self.sequence, short);
                CycleOutcome::Incomplete
            }
            Err(err) => {
                self.stats.timing_violations = self.stats.timing_violations.saturating_add(1);
                log::warn!("cycle {}: {}", self.sequence, err);
                CycleOutcome::TimingViolation
            }
        }
    }
}
