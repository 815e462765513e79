//! RGB indicator adapter — three discrete GPIO channels.

use rppal::gpio::{Gpio, Level, OutputPin};

use crate::error::Result;
use crate::hw::init_err;
use crate::ports::{Color, RgbOutput};

pub struct RgbLed {
    red: OutputPin,
    green: OutputPin,
    blue: OutputPin,
}

impl RgbLed {
    pub fn new(gpio: &Gpio, red: u8, green: u8, blue: u8) -> Result<Self> {
        let output = |n: u8| {
            gpio.get(n)
                .map(rppal::gpio::Pin::into_output)
                .map_err(|e| init_err("indicator GPIO unavailable", e))
        };
        Ok(Self {
            red: output(red)?,
            green: output(green)?,
            blue: output(blue)?,
        })
    }
}

fn level(on: bool) -> Level {
    if on { Level::High } else { Level::Low }
}

impl RgbOutput for RgbLed {
    /// All three channels written back-to-back under exclusive pin
    /// ownership; no other writer can interleave a partial color.
    fn set(&mut self, color: Color) {
        self.red.write(level(color.red));
        self.green.write(level(color.green));
        self.blue.write(level(color.blue));
    }

    fn off(&mut self) {
        self.set(Color::OFF);
    }
}
