//! Runtime configuration types
//!
//! What the original hardware generation handled with compile-time
//! switches is a plain struct read once at startup here, so one binary
//! covers every build variant and the host tests exercise the real code.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::DEFAULT_SETTLE_SECS;

/// Milliseconds between motion machine ticks
pub const MOTION_TICK_MS: u32 = 1000;

/// Milliseconds between disable-indicator blink ticks (50% duty at 2 Hz)
pub const BLINK_TICK_MS: u32 = 250;

/// Controller runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// False on boards without the PIR module fitted; the raw reading is
    /// then treated as never-high
    pub motion_sensor_fitted: bool,
    /// Boot settle window in seconds
    pub settle_secs: u8,
    /// Motion machine tick period
    pub motion_tick_ms: u32,
    /// Disable-indicator blink period
    pub blink_tick_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            motion_sensor_fitted: true,
            settle_secs: DEFAULT_SETTLE_SECS,
            motion_tick_ms: MOTION_TICK_MS,
            blink_tick_ms: BLINK_TICK_MS,
        }
    }
}
