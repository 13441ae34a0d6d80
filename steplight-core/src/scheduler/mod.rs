//! Cooperative periodic-task scheduler
//!
//! A fixed-capacity task list polled from the main loop. One poll call is
//! one instantaneous logical tick: every due task fires exactly once, in
//! registration order, never in parallel.

pub mod ticker;

pub use ticker::{SchedulerFull, Task, TaskId, Ticker};
