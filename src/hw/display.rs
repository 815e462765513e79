//! 4-digit 7-segment display driven through a chain of two 74HC595 shift
//! registers (one byte of segments, one byte of digit select).
//!
//! One `show` call runs a single multiplex pass: each digit's segment
//! pattern is shifted out together with its select bit, latched, and left
//! lit for a short dwell. The display loop re-renders continuously, which
//! is what keeps the digits visible.

use std::time::Duration;

use rppal::gpio::{Gpio, Level, OutputPin};

use crate::error::Result;
use crate::hw::init_err;
use crate::ports::{Glyph, GlyphDisplay};

/// Segment patterns for digits 0–9, bits a..g from LSB.
const SEGMENTS: [u8; 10] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F,
];
const DP_BIT: u8 = 0x80;

/// Per-digit dwell inside one multiplex pass.
const DIGIT_DWELL: Duration = Duration::from_micros(1500);

pub struct ShiftRegDisplay {
    data: OutputPin,
    clock: OutputPin,
    latch: OutputPin,
}

impl ShiftRegDisplay {
    pub fn new(gpio: &Gpio, data: u8, clock: u8, latch: u8) -> Result<Self> {
        let output = |n: u8| {
            gpio.get(n)
                .map(rppal::gpio::Pin::into_output)
                .map_err(|e| init_err("display GPIO unavailable", e))
        };
        Ok(Self {
            data: output(data)?,
            clock: output(clock)?,
            latch: output(latch)?,
        })
    }

    fn shift_out(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            let level = if byte & (1 << bit) != 0 { Level::High } else { Level::Low };
            self.data.write(level);
            self.clock.set_high();
            self.clock.set_low();
        }
    }

    fn latch_pulse(&mut self) {
        self.latch.set_high();
        self.latch.set_low();
    }

    fn glyph_segments(glyph: Glyph) -> u8 {
        match glyph {
            Glyph::Digit(d) if (d as usize) < SEGMENTS.len() => SEGMENTS[d as usize],
            Glyph::Digit(_) | Glyph::Blank => 0x00,
        }
    }
}

impl GlyphDisplay for ShiftRegDisplay {
    fn show(&mut self, glyphs: [Glyph; 4], dot: Option<u8>) {
        for (idx, glyph) in glyphs.into_iter().enumerate() {
            let mut segments = Self::glyph_segments(glyph);
            if dot == Some(idx as u8 + 1) {
                segments |= DP_BIT;
            }
            self.shift_out(segments);
            self.shift_out(1 << idx);
            self.latch_pulse();
            std::thread::sleep(DIGIT_DWELL);
        }
    }

    fn blank(&mut self) {
        self.shift_out(0x00);
        self.shift_out(0x0F);
        self.latch_pulse();
    }
}
