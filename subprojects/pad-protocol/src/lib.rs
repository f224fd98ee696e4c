//! # pad-protocol
//!
//! Data model and decoder for the SNES controller serial protocol.
//!
//! One poll cycle shifts 16 bits out of the controller, in a fixed order:
//!
//! ```text
//! Position  1  2  3       4      5   6     7     8      9  10  11 12  13-16
//! Button    B  Y  Select  Start  Up  Down  Left  Right  A  X   L  R   (none)
//! ```
//!
//! Levels on the wire are active-low: a low level means the button is held.
//! Positions 13-16 carry no buttons and idle high; their value never
//! influences the decoded state, but a low trailer is worth reporting since
//! it usually means bus noise or a mis-synced cycle.
//!
//! ## References
//! - <https://www.repairfaq.org/REPAIR/F_SNES.html>
//! - <https://problemkaputt.de/fullsnes.htm#snescontrollersioports>

#![no_std]

mod buttons;
mod decode;
mod frame;

pub use self::{
    buttons::{Buttons, ButtonState, CAPTURE_ORDER},
    decode::{Decoded, Trailer, decode},
    frame::{FRAME_BITS, IncompleteFrame, RawSampleBuffer, SampleFrame},
};
