//! Glue controller
//!
//! Owns the flag register, the motion monitor, and the physical pins, and
//! is the single place where flag state becomes externally observable.

pub mod controller;

pub use controller::Controller;
