//! Board-agnostic core logic for the step-light firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (digital input/output pins)
//! - Admin flag register with change-triggered output refresh
//! - Cooperative periodic-task scheduler
//! - Motion debounce state machine
//! - Glue controller wiring the above together
//! - Runtime configuration type definitions

// no_std in production; host test builds need std for the proptest runner
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod flags;
pub mod motion;
pub mod scheduler;
pub mod traits;
