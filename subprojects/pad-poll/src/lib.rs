//! # pad-poll
//!
//! The poll scheduler: one bus cycle per timer tick, at a fixed 60 Hz
//! cadence, with local recovery for every failure the bus can produce.
//!
//! The scheduler is meant to be invoked from a periodic timer interrupt.
//! Each tick runs exactly one latch/clock/sample cycle, decodes the result,
//! and publishes the snapshot into a last-value-wins slot for the wireless
//! consumer. Nothing here blocks, nothing here panics, and no failure stops
//! the next tick: a violated cycle costs one snapshot, never the stream.

#![no_std]

mod scheduler;

pub use self::scheduler::{CycleOutcome, PollScheduler, PollStats};
