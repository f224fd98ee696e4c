//! # pad-sim
//!
//! A behavioral model of the controller's shift register, its three bus
//! lines, and a microsecond counter, for exercising the bus driver and the
//! poll scheduler without hardware.
//!
//! The model mimics the pad's two daisy-chained parallel-in shift registers:
//! a rising latch edge captures the current button levels, the first bit is
//! presented immediately, and every rising clock edge shifts the next bit
//! onto the data line. Positions beyond the sixteenth read as idle-high.
//!
//! Time is a [`Cell`]-backed counter at 1 MHz (one tick per microsecond)
//! that advances by one tick per read, so the driver's busy-waits make
//! progress deterministically. Fault injection hooks stall a single data
//! capture or a single clock edge to provoke the driver's abort paths, and
//! per-cycle audit counters expose the waveform the driver actually drove.

#![no_std]

use core::{cell::Cell, convert::Infallible};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use pad_protocol::{Buttons, FRAME_BITS};
use pad_timing::TickSource;

/// Raw idle level of the four trailer positions (all high).
const TRAILER_IDLE: u8 = 0b1111;

/// One-shot stall applied to a specific data capture or clock edge.
#[derive(Clone, Copy)]
struct Stall {
    /// 1-based capture position or pulse number the stall applies to.
    target: u8,
    /// Ticks to burn when it fires.
    ticks: u64,
}

/// The simulated pad and bus.
///
/// All state lives in `Cell`s so the pin and counter handles can share one
/// `&SimPad` without locking; the model is single-context by design, like
/// the decode path it stands in for.
pub struct SimPad {
    time: Cell<u64>,
    pressed: Cell<u16>,
    trailer: Cell<u8>,

    latch_level: Cell<bool>,
    clock_level: Cell<bool>,
    latched: Cell<u16>,
    shift_index: Cell<usize>,

    capture_stall: Cell<Option<Stall>>,
    clock_low_stall: Cell<Option<Stall>>,

    // Per-cycle waveform audit.
    cycles: Cell<u32>,
    latch_rise_at: Cell<u64>,
    latch_fall_at: Cell<u64>,
    latch_width: Cell<u64>,
    first_clock_gap: Cell<u64>,
    clock_lows_this_cycle: Cell<u32>,
    clock_pulses_this_cycle: Cell<u32>,
}

impl SimPad {
    /// Creates a pad with the given buttons held and an idle trailer.
    ///
    /// The bus lines start at their idle levels (latch low, clock high).
    pub fn new(pressed: Buttons) -> Self {
        Self {
            time: Cell::new(0),
            pressed: Cell::new(pressed.bits()),
            trailer: Cell::new(TRAILER_IDLE),
            latch_level: Cell::new(false),
            clock_level: Cell::new(true),
            latched: Cell::new(0),
            shift_index: Cell::new(FRAME_BITS),
            capture_stall: Cell::new(None),
            clock_low_stall: Cell::new(None),
            cycles: Cell::new(0),
            latch_rise_at: Cell::new(0),
            latch_fall_at: Cell::new(0),
            latch_width: Cell::new(0),
            first_clock_gap: Cell::new(0),
            clock_lows_this_cycle: Cell::new(0),
            clock_pulses_this_cycle: Cell::new(0),
        }
    }

    /// Changes which buttons are held; takes effect at the next latch pulse.
    pub fn set_pressed(&self, pressed: Buttons) {
        self.pressed.set(pressed.bits());
    }

    /// Overrides the raw levels of positions 13-16 (low nibble, bit 0 =
    /// position 13). Anything other than `0b1111` is bus noise.
    pub fn set_trailer(&self, trailer: u8) {
        self.trailer.set(trailer & 0b1111);
    }

    /// Stalls the next data read of the given capture position (1-based) by
    /// `ticks`. One-shot: cleared once it fires.
    pub fn stall_capture(&self, position: u8, ticks: u64) {
        self.capture_stall.set(Some(Stall {
            target: position,
            ticks,
        }));
    }

    /// Stalls the falling edge of the given clock pulse (1-based) by
    /// `ticks`, so the following edge's deadline is already gone. One-shot.
    pub fn stall_clock_low(&self, pulse: u8, ticks: u64) {
        self.clock_low_stall.set(Some(Stall {
            target: pulse,
            ticks,
        }));
    }

    /// Handle implementing `OutputPin` for the latch line.
    pub fn latch_pin(&self) -> LatchPin<'_> {
        LatchPin { pad: self }
    }

    /// Handle implementing `OutputPin` for the clock line.
    pub fn clock_pin(&self) -> ClockPin<'_> {
        ClockPin { pad: self }
    }

    /// Handle implementing `InputPin` for the data line.
    pub fn data_pin(&self) -> DataPin<'_> {
        DataPin { pad: self }
    }

    /// Handle implementing [`TickSource`] over the simulated counter.
    pub fn ticks(&self) -> SimTicks<'_> {
        SimTicks { pad: self }
    }

    /// Number of latch pulses seen so far.
    pub fn cycles(&self) -> u32 {
        self.cycles.get()
    }

    /// Width of the most recent completed latch pulse, in ticks.
    pub fn last_latch_width(&self) -> u64 {
        self.latch_width.get()
    }

    /// Gap between the last latch fall and the first clock low, in ticks.
    pub fn last_first_clock_gap(&self) -> u64 {
        self.first_clock_gap.get()
    }

    /// Completed clock pulses (rising edges) since the last latch pulse.
    pub fn last_clock_pulses(&self) -> u32 {
        self.clock_pulses_this_cycle.get()
    }

    /// The raw 16 levels the next latch pulse will capture.
    fn raw_word(&self) -> u16 {
        let buttons = !self.pressed.get() & 0x0FFF;
        buttons | (self.trailer.get() as u16) << 12
    }

    fn stamp(&self) -> u64 {
        self.time.get()
    }

    fn burn(&self, ticks: u64) {
        self.time.set(self.time.get() + ticks);
    }

    fn on_latch_rise(&self) {
        self.latched.set(self.raw_word());
        self.shift_index.set(0);
        self.cycles.set(self.cycles.get() + 1);
        self.latch_rise_at.set(self.stamp());
        self.clock_lows_this_cycle.set(0);
        self.clock_pulses_this_cycle.set(0);
    }

    fn on_latch_fall(&self) {
        self.latch_fall_at.set(self.stamp());
        self.latch_width
            .set(self.stamp() - self.latch_rise_at.get());
    }

    fn on_clock_fall(&self) {
        let pulse = self.clock_lows_this_cycle.get() + 1;
        self.clock_lows_this_cycle.set(pulse);
        if pulse == 1 {
            self.first_clock_gap
                .set(self.stamp() - self.latch_fall_at.get());
        }
        if let Some(stall) = self.clock_low_stall.get()
            && u32::from(stall.target) == pulse
        {
            self.clock_low_stall.set(None);
            self.burn(stall.ticks);
        }
    }

    fn on_clock_rise(&self) {
        self.shift_index.set(self.shift_index.get() + 1);
        self.clock_pulses_this_cycle
            .set(self.clock_pulses_this_cycle.get() + 1);
    }

    fn data_level(&self) -> bool {
        let index = self.shift_index.get();
        if let Some(stall) = self.capture_stall.get()
            && usize::from(stall.target) == index + 1
        {
            self.capture_stall.set(None);
            self.burn(stall.ticks);
        }
        if index < FRAME_BITS {
            self.latched.get() & (1 << index) != 0
        } else {
            // Shifted past the last stage: the line idles high.
            true
        }
    }
}

/// Latch line handle.
pub struct LatchPin<'a> {
    pad: &'a SimPad,
}

impl ErrorType for LatchPin<'_> {
    type Error = Infallible;
}

impl OutputPin for LatchPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.pad.latch_level.replace(false) {
            self.pad.on_latch_fall();
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.pad.latch_level.replace(true) {
            self.pad.on_latch_rise();
        }
        Ok(())
    }
}

/// Clock line handle.
pub struct ClockPin<'a> {
    pad: &'a SimPad,
}

impl ErrorType for ClockPin<'_> {
    type Error = Infallible;
}

impl OutputPin for ClockPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.pad.clock_level.replace(false) {
            self.pad.on_clock_fall();
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.pad.clock_level.replace(true) {
            self.pad.on_clock_rise();
        }
        Ok(())
    }
}

/// Data line handle.
pub struct DataPin<'a> {
    pad: &'a SimPad,
}

impl ErrorType for DataPin<'_> {
    type Error = Infallible;
}

impl InputPin for DataPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pad.data_level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pad.data_level())
    }
}

/// The simulated 1 MHz monotonic counter.
///
/// Every read advances time by one tick, so busy-waits terminate and the
/// driver's deadline math sees whole microseconds.
pub struct SimTicks<'a> {
    pad: &'a SimPad,
}

impl TickSource for SimTicks<'_> {
    fn now(&self) -> u64 {
        let t = self.pad.time.get();
        self.pad.time.set(t + 1);
        t
    }

    fn ticks_per_second(&self) -> u64 {
        1_000_000
    }
}
