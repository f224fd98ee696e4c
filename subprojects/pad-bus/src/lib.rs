//! # pad-bus
//!
//! Driver for the controller's three-line serial bus.
//!
//! The bus is initiator-clocked and has no handshaking: the driver owns the
//! latch and clock lines, the controller only ever answers on the data line,
//! and a late edge or a late sample is unrecoverable within its cycle. All
//! scheduling is done by comparing a monotonic counter against absolute
//! deadlines derived from the cycle start; a deadline missed by more than
//! the half-period budget abandons the cycle on the spot.
//!
//! Pin access goes through the `embedded-hal` digital traits, so the driver
//! runs unchanged on any HAL (and on the simulated pad used by the tests).
//!
//! ## References
//! - <https://www.repairfaq.org/REPAIR/F_SNES.html>

#![no_std]

mod cycle;
mod pins;
mod pulse;
mod sample;

pub use self::{
    cycle::{BusCycleError, SnesBus},
    pins::{BusPinSet, LineFault},
    pulse::PulseGenerator,
    sample::BitSampler,
};
