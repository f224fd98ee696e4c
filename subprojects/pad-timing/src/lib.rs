//! # pad-timing
//!
//! Timing primitives for the SNES controller serial bus.
//!
//! The bus has no handshaking: every edge the initiator drives and every
//! sample it takes must land at an absolute instant relative to the start of
//! the poll cycle. This crate provides the documented pulse widths and
//! cadence as constants, a [`Microseconds`] newtype with tick conversion, a
//! [`TickSource`] abstraction over the platform's monotonic counter, and
//! [`wait_until`], a bounded busy-wait that reports how late it arrived.
//!
//! ## References
//! - <https://www.repairfaq.org/REPAIR/F_SNES.html>
//! - <https://problemkaputt.de/fullsnes.htm#snescontrollersioports>

#![no_std]

mod micros;
mod tick;

pub mod bus;

pub use self::{
    micros::Microseconds,
    tick::{DeadlineMissed, TickSource, wait_until},
};
