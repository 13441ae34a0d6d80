//! Motion monitor implementation
//!
//! Single-sample edge detection: any one-second sample that differs from
//! the recorded state flips it immediately. There is no multi-sample
//! confirmation window; PIR modules do their own on-board integration, so
//! sensor chatter is not smoothed here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds after boot during which real input is ignored
///
/// PIR sensors report garbage until their pyro element settles.
pub const DEFAULT_SETTLE_SECS: u8 = 11;

/// Sentinel hour value reported while settling
///
/// The running clock saturates at 254, so 255 unambiguously means "the
/// device has not settled yet" to any consumer.
pub const SETTLING_HOURS: u8 = 255;

/// Time elapsed since the last debounced transition
///
/// Seconds and minutes roll over at 59; hours stop incrementing at 254
/// (saturating, never wrapping). Reset to zero on every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionClock {
    /// Seconds since last change, 0..=59
    pub seconds: u8,
    /// Minutes since last change, 0..=59
    pub minutes: u8,
    /// Hours since last change, saturating at 254 (255 = settling sentinel)
    pub hours: u8,
}

impl MotionClock {
    /// A freshly reset clock
    pub const fn zero() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
            hours: 0,
        }
    }

    /// Advance by one second with rollover
    fn advance(&mut self) {
        self.seconds += 1;
        if self.seconds > 59 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes > 59 {
                self.minutes = 0;
                if self.hours < SETTLING_HOURS - 1 {
                    self.hours += 1;
                }
            }
        }
    }
}

/// Outcome of one monitor tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionTick {
    /// Still inside the boot settle window; input was ignored
    Settling,
    /// Sample agreed with the recorded state; only the clock advanced
    Unchanged,
    /// Sample differed; the recorded state must flip to the carried value
    Changed(bool),
}

/// Debounced motion state machine
///
/// Ticked once per second by the scheduler. The monitor never touches the
/// flag register itself: it reports `Changed` and the controller applies
/// the flip, keeping flag mutation routed through one owner.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionMonitor {
    clock: MotionClock,
    settle_remaining: u8,
    override_remaining: u16,
}

impl MotionMonitor {
    /// Create a monitor that ignores input for `settle_secs` ticks
    pub const fn new(settle_secs: u8) -> Self {
        Self {
            clock: MotionClock::zero(),
            settle_remaining: settle_secs,
            override_remaining: 0,
        }
    }

    /// Elapsed time since the last debounced transition
    pub fn clock(&self) -> MotionClock {
        self.clock
    }

    /// True while the boot settle window is still running
    pub fn is_settling(&self) -> bool {
        self.settle_remaining > 0
    }

    /// Remaining seconds of forced detection
    pub fn override_remaining(&self) -> u16 {
        self.override_remaining
    }

    /// Force "motion detected" for the next `secs` one-second ticks
    ///
    /// Used by the command channel to simulate a trigger without walking
    /// past the sensor.
    pub fn force_detection_for(&mut self, secs: u16) {
        self.override_remaining = secs;
    }

    /// Run one one-second tick
    ///
    /// `raw_high` is the instantaneous pin reading, `sensor_disabled` the
    /// admin override, `current` the debounced state on record. The
    /// override countdown is consumed before it is decremented, so an
    /// override of N forces exactly N ticks of detection.
    pub fn tick(&mut self, raw_high: bool, sensor_disabled: bool, current: bool) -> MotionTick {
        let raw_detected = self.override_remaining > 0 || (!sensor_disabled && raw_high);

        if self.override_remaining > 0 {
            self.override_remaining -= 1;
        }

        // During the settle window the clock counts the window down in the
        // seconds/minutes fields and pins hours at the sentinel, so
        // consumers can tell the device has not settled.
        if self.settle_remaining > 0 {
            self.settle_remaining -= 1;
            self.clock.seconds = self.settle_remaining;
            self.clock.minutes = self.settle_remaining;
            self.clock.hours = SETTLING_HOURS;
            return MotionTick::Settling;
        }

        if raw_detected == current {
            self.clock.advance();
            MotionTick::Unchanged
        } else {
            self.clock = MotionClock::zero();
            MotionTick::Changed(raw_detected)
        }
    }
}

impl Default for MotionMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_SECS)
    }
}
