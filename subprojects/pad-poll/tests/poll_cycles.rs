//! End-to-end poll cycles against the simulated pad.

use pad_bus::{BusPinSet, SnesBus};
use pad_poll::{CycleOutcome, PollScheduler};
use pad_protocol::{ButtonState, Buttons};
use pad_sim::{ClockPin, DataPin, LatchPin, SimPad, SimTicks};
use pad_sync::{Latest, Publisher, Watcher};
use pad_timing::bus::POLL_PERIOD;

type SimScheduler<'a> =
    PollScheduler<'a, LatchPin<'a>, ClockPin<'a>, DataPin<'a>, SimTicks<'a>>;

fn scheduler_for<'a>(
    pad: &'a SimPad,
    publisher: Publisher<'a, ButtonState>,
) -> SimScheduler<'a> {
    let pins = BusPinSet::new(pad.latch_pin(), pad.clock_pin(), pad.data_pin()).unwrap();
    PollScheduler::new(SnesBus::new(pins, pad.ticks()), publisher)
}

#[test]
fn a_decoded_cycle_is_published_with_its_sequence_number() {
    let pad = SimPad::new(Buttons::B);
    let mut slot = Latest::new();
    let (publisher, mut watcher): (_, Watcher<'_, ButtonState>) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    let outcome = scheduler.poll_tick();
    let CycleOutcome::Decoded(state) = outcome else {
        panic!("expected a decoded cycle, got {outcome:?}");
    };

    assert_eq!(state.buttons(), Buttons::B);
    assert_eq!(state.sequence(), 1);
    assert_eq!(watcher.read(), Some(state));
}

#[test]
fn button_changes_show_up_on_the_next_cycle() {
    let pad = SimPad::new(Buttons::empty());
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    scheduler.poll_tick();
    assert_eq!(watcher.read().unwrap().buttons(), Buttons::empty());

    pad.set_pressed(Buttons::LEFT | Buttons::A);
    scheduler.poll_tick();
    assert_eq!(watcher.read().unwrap().buttons(), Buttons::LEFT | Buttons::A);
}

#[test]
fn a_late_capture_yields_incomplete_and_keeps_the_previous_snapshot() {
    let pad = SimPad::new(Buttons::UP);
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    assert!(matches!(scheduler.poll_tick(), CycleOutcome::Decoded(_)));
    let before = watcher.read().unwrap();

    // Bit 9's capture exceeds the 6 us budget on the next cycle.
    pad.stall_capture(9, 50);
    assert_eq!(scheduler.poll_tick(), CycleOutcome::Incomplete);

    assert_eq!(watcher.read(), Some(before));
    assert_eq!(scheduler.stats().incomplete, 1);
    assert_eq!(scheduler.stats().published, 1);
}

#[test]
fn a_late_clock_edge_yields_a_timing_violation_and_keeps_the_previous_snapshot() {
    let pad = SimPad::new(Buttons::SELECT);
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    assert!(matches!(scheduler.poll_tick(), CycleOutcome::Decoded(_)));
    let before = watcher.read().unwrap();

    pad.stall_clock_low(5, 50);
    assert_eq!(scheduler.poll_tick(), CycleOutcome::TimingViolation);

    assert_eq!(watcher.read(), Some(before));
    assert_eq!(scheduler.stats().timing_violations, 1);
}

#[test]
fn the_sequence_number_advances_through_failed_cycles() {
    let pad = SimPad::new(Buttons::empty());
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    pad.stall_capture(1, 50);
    assert_eq!(scheduler.poll_tick(), CycleOutcome::Incomplete);

    assert!(matches!(scheduler.poll_tick(), CycleOutcome::Decoded(_)));
    // The published snapshot carries sequence 2: the gap at 1 is visible.
    assert_eq!(watcher.read().unwrap().sequence(), 2);
}

#[test]
fn a_noisy_trailer_is_counted_but_still_published() {
    let pad = SimPad::new(Buttons::X);
    pad.set_trailer(0b0111);
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    assert!(matches!(scheduler.poll_tick(), CycleOutcome::Decoded(_)));

    let state = watcher.read().unwrap();
    assert_eq!(state.buttons(), Buttons::X);
    assert_eq!(scheduler.stats().trailer_anomalies, 1);
    assert_eq!(scheduler.stats().published, 1);
}

#[test]
fn a_thousand_nominal_cycles_run_clean() {
    let pad = SimPad::new(Buttons::B | Buttons::Y);
    let mut slot = Latest::new();
    let (publisher, mut watcher) = slot.split();
    let mut scheduler = scheduler_for(&pad, publisher);

    for _ in 0..1_000 {
        assert!(matches!(scheduler.poll_tick(), CycleOutcome::Decoded(_)));
    }

    assert_eq!(scheduler.sequence(), 1_000);
    let stats = scheduler.stats();
    assert_eq!(stats.published, 1_000);
    assert_eq!(stats.timing_violations, 0);
    assert_eq!(stats.incomplete, 0);
    assert_eq!(stats.trailer_anomalies, 0);
    assert_eq!(watcher.read().unwrap().sequence(), 1_000);
    assert_eq!(pad.cycles(), 1_000);
}

#[test]
fn the_default_period_is_the_60_hz_cadence() {
    let pad = SimPad::new(Buttons::empty());
    let mut slot = Latest::new();
    let (publisher, _watcher) = slot.split();
    let scheduler = scheduler_for(&pad, publisher);

    assert_eq!(scheduler.period(), POLL_PERIOD);
}
