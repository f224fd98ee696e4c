//! Pure frame-to-state decoding.

use crate::{
    buttons::{Buttons, CAPTURE_ORDER},
    frame::{FRAME_BITS, SampleFrame},
};

/// State of the four trailer bits of a frame.
///
/// Positions 13-16 carry no buttons and are expected to idle high. A low
/// trailer bit never fails the cycle and never changes the decoded buttons,
/// but it signals bus noise or a mis-synced cycle, so it is surfaced for
/// observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    /// All four trailer bits were high, as expected.
    Idle,
    /// At least one trailer bit was low.
    Anomalous,
}

/// Result of decoding one complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Buttons held during the cycle.
    pub buttons: Buttons,
    /// Whether the trailer bits matched their expected idle level.
    pub trailer: Trailer,
}

/// Decodes a complete frame into the set of held buttons.
///
/// Pure and total: every frame maps to exactly one output, the same frame
/// always maps to the same output, and no two frames differing in positions
/// 1-12 map to the same `buttons`. Levels are active-low, so a low level at
/// position `n` sets the button at `CAPTURE_ORDER[n - 1]`.
pub fn decode(frame: &SampleFrame) -> Decoded {
    let mut buttons = Buttons::empty();
    for (pos, &button) in CAPTURE_ORDER.iter().enumerate() {
        if !frame.level(pos) {
            buttons |= button;
        }
    }

    let trailer_idle = (CAPTURE_ORDER.len()..FRAME_BITS).all(|pos| frame.level(pos));
    let trailer = if trailer_idle {
        Trailer::Idle
    } else {
        Trailer::Anomalous
    };

    Decoded { buttons, trailer }
}
