//! Cancellable deferred tasks
//!
//! The event loop owns the clock: callers pass `now` into every method, and
//! nothing here sleeps or spawns. Tests drive time by adding durations to a
//! fixed `Instant`.

use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::schedule`], used to cancel one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

struct ScheduledTask<T> {
    handle: TaskHandle,
    due: Instant,
    item: T,
}

/// Queue of items that become due at a given instant
pub struct Scheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `item` to become due at `due`
    pub fn schedule(&mut self, due: Instant, item: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { handle, due, item });
        handle
    }

    /// Cancel one task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel every task whose item matches `pred`, returning how many were dropped
    pub fn cancel_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|task| !pred(&task.item));
        before - self.tasks.len()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return all items due at or before `now`
    ///
    /// Items come back in due order; ties keep scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due <= now {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by_key(|task| (task.due, task.handle.0));
        due.into_iter().map(|task| task.item).collect()
    }

    /// Time until the earliest pending task, `None` if nothing is pending
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|task| task.due)
            .min()
            .map(|next| next.saturating_duration_since(now))
    }

    /// Pending tasks in due order
    pub fn pending(&self) -> Vec<(Instant, &T)> {
        let mut pending: Vec<_> = self.tasks.iter().collect();
        pending.sort_by_key(|task| (task.due, task.handle.0));
        pending.into_iter().map(|task| (task.due, &task.item)).collect()
    }

    /// Whether any pending item matches `pred`
    pub fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.tasks.iter().any(|task| pred(&task.item))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_in_order() {
        let base = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(base + Duration::from_secs(2), "b");
        sched.schedule(base, "a");
        sched.schedule(base + Duration::from_secs(5), "c");

        assert_eq!(sched.take_due(base + Duration::from_secs(3)), vec!["a", "b"]);
        assert_eq!(sched.len(), 1);
        assert_eq!(
            sched.time_until_next(base + Duration::from_secs(3)),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let base = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(base, 1);
        sched.schedule(base, 2);
        sched.schedule(base, 3);
        assert_eq!(sched.take_due(base), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_by_handle() {
        let base = Instant::now();
        let mut sched = Scheduler::new();
        let first = sched.schedule(base, "first");
        sched.schedule(base, "second");

        assert!(sched.cancel(first));
        assert!(!sched.cancel(first));
        assert_eq!(sched.take_due(base), vec!["second"]);
    }

    #[test]
    fn test_cancel_where() {
        let base = Instant::now();
        let mut sched = Scheduler::new();
        for n in 0..6 {
            sched.schedule(base, n);
        }
        assert_eq!(sched.cancel_where(|n| n % 2 == 0), 3);
        assert!(!sched.any(|n| n % 2 == 0));
        assert_eq!(sched.len(), 3);
    }

    #[test]
    fn test_overdue_reports_zero() {
        let base = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(base, ());
        assert_eq!(
            sched.time_until_next(base + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
        sched.clear();
        assert_eq!(sched.time_until_next(base), None);
    }
}
