//! Button flags and the published snapshot type.

use core::fmt;

use bitflags::bitflags;
use static_assertions::const_assert_eq;

bitflags! {
    /// The twelve buttons of the pad, packed into a `u16`.
    ///
    /// Bit `n` of the packed word is capture position `n + 1`, so the word
    /// doubles as the on-air report layout. Bits 12-15 are never set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const B      = 1 << 0;
        const Y      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const UP     = 1 << 4;
        const DOWN   = 1 << 5;
        const LEFT   = 1 << 6;
        const RIGHT  = 1 << 7;
        const A      = 1 << 8;
        const X      = 1 << 9;
        const L      = 1 << 10;
        const R      = 1 << 11;
    }
}

/// The buttons in the order the controller shifts them out.
///
/// `CAPTURE_ORDER[n]` is the button whose level arrives at capture position
/// `n + 1`.
pub const CAPTURE_ORDER: [Buttons; 12] = [
    Buttons::B,
    Buttons::Y,
    Buttons::SELECT,
    Buttons::START,
    Buttons::UP,
    Buttons::DOWN,
    Buttons::LEFT,
    Buttons::RIGHT,
    Buttons::A,
    Buttons::X,
    Buttons::L,
    Buttons::R,
];

const_assert_eq!(CAPTURE_ORDER.len(), 12);

/// An immutable snapshot of the pad, as decoded from one poll cycle.
///
/// Carries the pressed set plus the cycle sequence number and the capture
/// timestamp (raw ticks at latch-pulse start). Snapshots are `Copy` and
/// never expose partial state: a `ButtonState` exists only once all 16 bits
/// of its cycle were captured and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    buttons: Buttons,
    sequence: u64,
    timestamp: u64,
}

impl ButtonState {
    /// Builds a snapshot from a decoded pressed set.
    #[inline]
    pub const fn new(buttons: Buttons, sequence: u64, timestamp: u64) -> Self {
        Self {
            buttons,
            sequence,
            timestamp,
        }
    }

    /// The set of buttons held during the cycle.
    #[inline]
    pub const fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Whether every button in `buttons` was held.
    #[inline]
    pub fn pressed(&self, buttons: Buttons) -> bool {
        self.buttons.contains(buttons)
    }

    /// The cycle sequence number this snapshot was decoded from.
    ///
    /// The poll scheduler advances the number on every cycle, including
    /// failed ones, so a gap between consecutive observed snapshots means
    /// cycles were lost in between.
    #[inline]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Raw tick count at the start of the cycle's latch pulse.
    #[inline]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.buttons.bits())
    }
}
