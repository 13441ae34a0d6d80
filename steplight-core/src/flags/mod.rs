//! Admin flag register
//!
//! One byte of named boolean flags shared by the motion machine, the
//! indicator outputs, and the telemetry surface.

pub mod register;

pub use register::{Flag, FlagRegister, FLAG_BITS};
