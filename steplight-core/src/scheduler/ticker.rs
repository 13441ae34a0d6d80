//! Ticker scheduler implementation
//!
//! Tasks are plain `fn(&mut C)` context callbacks: the registry holds no
//! captured state, so the schedule is static for the device's lifetime and
//! needs no allocation. `C` is the glue controller in production and
//! whatever the test wants otherwise.

use heapless::Vec;

/// A scheduled callback, invoked with the shared context
pub type Task<C> = fn(&mut C);

/// Handle returned by [`Ticker::schedule`]
///
/// Tasks cannot be removed or re-timed after registration; the id exists
/// only for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskId(pub usize);

/// The task registry is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerFull;

#[derive(Debug)]
struct TaskSlot<C> {
    run: Task<C>,
    period_ms: u32,
    due_at_ms: u64,
}

/// Cooperative fixed-capacity periodic scheduler
///
/// `N` is the registry capacity, sized at startup. Polling never blocks;
/// a long-running callback simply delays later-due tasks within the same
/// poll call (accepted by design, see the crate-level concurrency notes).
#[derive(Debug, Default)]
pub struct Ticker<C, const N: usize> {
    tasks: Vec<TaskSlot<C>, N>,
}

impl<C, const N: usize> Ticker<C, N> {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a periodic task
    ///
    /// First execution is due at `now_ms + period_ms`; afterwards the task
    /// re-arms relative to the poll time that fired it.
    pub fn schedule(
        &mut self,
        now_ms: u64,
        period_ms: u32,
        run: Task<C>,
    ) -> Result<TaskId, SchedulerFull> {
        let id = TaskId(self.tasks.len());
        self.tasks
            .push(TaskSlot {
                run,
                period_ms,
                due_at_ms: now_ms + u64::from(period_ms),
            })
            .map_err(|_| SchedulerFull)?;
        Ok(id)
    }

    /// Run every due task once and re-arm it
    ///
    /// A task whose due time was missed by several periods still fires
    /// exactly once and re-arms to `now_ms + period`, not the missed
    /// boundary: drift is accepted, backlog is not. Tasks run in
    /// registration order. Returns the number of tasks fired.
    pub fn poll(&mut self, now_ms: u64, ctx: &mut C) -> usize {
        let mut fired = 0;
        for slot in self.tasks.iter_mut() {
            if now_ms >= slot.due_at_ms {
                slot.due_at_ms = now_ms + u64::from(slot.period_ms);
                (slot.run)(ctx);
                fired += 1;
            }
        }
        fired
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if no tasks are registered
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registry capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}
