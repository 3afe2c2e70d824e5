//! Cooperative periodic scheduler
//!
//! The host loop feeds elapsed wall time into `advance`, which reports the
//! tasks that came due, in due-time order. Suspending freezes every timer
//! in place so that a later `resume` continues with the remaining time
//! intact rather than restarting the periods.

/// Handle returned by `schedule`, used to cancel a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    handle: TimerHandle,
    period_ms: f64,
    /// Time accumulated toward the next fire
    elapsed_ms: f64,
    task: T,
}

/// Periodic timers keyed by handle
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_handle: u32,
    suspended: bool,
    /// Upper bound on fires per timer per `advance`
    max_fires: u32,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 1,
            suspended: false,
            max_fires: 64,
        }
    }

    /// Arm a timer firing every `period_ms` (clamped to at least 1 ms)
    pub fn schedule(&mut self, period_ms: f64, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            period_ms: period_ms.max(1.0),
            elapsed_ms: 0.0,
            task,
        });
        handle
    }

    /// Disarm a timer. Returns false if it was already gone.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Disarm everything and clear the suspension flag
    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.suspended = false;
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Milliseconds until `handle` fires next
    pub fn remaining_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.period_ms - t.elapsed_ms)
    }
}

impl<T: Copy> Scheduler<T> {
    /// Advance every timer by `dt_ms` and return due tasks ordered by the
    /// moment they came due. Nothing accumulates while suspended.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(TimerHandle, T)> {
        if self.suspended || dt_ms <= 0.0 {
            return Vec::new();
        }

        // (offset into this advance at which the fire happened, arm order)
        let mut due: Vec<(f64, usize, TimerHandle, T)> = Vec::new();
        for (order, timer) in self.timers.iter_mut().enumerate() {
            let start = timer.elapsed_ms;
            timer.elapsed_ms += dt_ms;
            let mut fires = 0;
            while timer.elapsed_ms >= timer.period_ms && fires < self.max_fires {
                timer.elapsed_ms -= timer.period_ms;
                let offset = timer.period_ms * (fires + 1) as f64 - start;
                due.push((offset, order, timer.handle, timer.task));
                fires += 1;
            }
            if fires == self.max_fires {
                // Drop the backlog rather than replaying it next frame
                timer.elapsed_ms = timer.elapsed_ms.min(timer.period_ms - f64::EPSILON);
            }
        }

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, h, t)| (h, t)).collect()
    }
}
