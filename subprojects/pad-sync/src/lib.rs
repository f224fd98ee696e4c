//! # pad-sync
//!
//! Lock-free handoff primitives between the real-time decode path and its
//! consumer. No allocation, no OS services: everything here is built from
//! `core` atomics so it can sit between an interrupt context and thread
//! code.

#![no_std]

pub mod latest;

pub use self::latest::{Latest, Publisher, Watcher};
