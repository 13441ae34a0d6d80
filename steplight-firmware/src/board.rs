//! Pin adapters
//!
//! Bridges embassy-rp GPIO types to the core crate's pin traits.

use embassy_rp::gpio::{Input, Output};

use steplight_core::traits::{InputPin, OutputPin};

/// Motion sensor input
pub struct SensorPin {
    pin: Input<'static>,
}

impl SensorPin {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }
}

impl InputPin for SensorPin {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Indicator LED output
pub struct IndicatorPin {
    pin: Output<'static>,
}

impl IndicatorPin {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for IndicatorPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
