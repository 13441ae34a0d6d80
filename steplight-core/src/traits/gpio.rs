//! Digital pin abstractions
//!
//! The controller reads the motion sensor and drives the indicator outputs
//! through these traits. All operations are synchronous and treated as
//! instantaneous; implementations must not block.

/// Digital input pin (motion sensor)
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Digital output pin (indicator LEDs)
///
/// Implementations must be able to report the last driven level so the
/// controller can re-derive outputs idempotently.
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin was last driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin was last driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
