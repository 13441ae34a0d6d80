//! Motion debounce state machine
//!
//! Converts the raw motion-pin reading plus manual overrides into a stable
//! "motion present" decision and tracks time since the last transition.

pub mod monitor;

pub use monitor::{MotionClock, MotionMonitor, MotionTick, DEFAULT_SETTLE_SECS, SETTLING_HOURS};
