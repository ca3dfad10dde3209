//! Cooperative task scheduler
//!
//! An explicit list of (period, task) entries driven by one external
//! tick source. Tasks run to completion in registration order; there is
//! no preemption and no task ever runs twice in one tick, so a tick
//! that arrives late runs each overdue task once with the real elapsed
//! time as its `dt`.

/// One periodic task over a shared context
struct Task<C> {
    name: &'static str,
    period_ms: u64,
    /// Time accumulated since this task last ran
    since_run_ms: u64,
    run: Box<dyn FnMut(&mut C, f32)>,
}

/// Periodic task list driven by [`Scheduler::tick`]
pub struct Scheduler<C> {
    tasks: Vec<Task<C>>,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a task; tasks run in registration order
    ///
    /// The closure receives the shared context and the seconds elapsed
    /// since its own previous run.
    pub fn add<F>(&mut self, name: &'static str, period_ms: u64, run: F)
    where
        F: FnMut(&mut C, f32) + 'static,
    {
        log::debug!("task '{name}' registered at {period_ms} ms");
        self.tasks.push(Task {
            name,
            period_ms,
            since_run_ms: 0,
            run: Box::new(run),
        });
    }

    /// Advance time by `elapsed_ms` and run every task that came due
    pub fn tick(&mut self, elapsed_ms: u64, ctx: &mut C) {
        for task in &mut self.tasks {
            task.since_run_ms += elapsed_ms;
            if task.since_run_ms >= task.period_ms {
                if task.since_run_ms >= task.period_ms * 2 {
                    log::trace!(
                        "task '{}' behind by {} ms",
                        task.name,
                        task.since_run_ms - task.period_ms
                    );
                }
                let dt = task.since_run_ms as f32 * 1e-3;
                task.since_run_ms = 0;
                (task.run)(ctx, dt);
            }
        }
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
