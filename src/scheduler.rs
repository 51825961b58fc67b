//! Deadline tasks with cancellable handles.
//!
//! Nothing here owns a clock. The host pumps [`Scheduler::take_due`] with the
//! current instant, which keeps the engine usable from fixed-tick loops and
//! render threads alike.

use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: Instant,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled { handle, due, task });
        handle
    }

    /// Returns true when the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for t in self.tasks.drain(..) {
            if t.due <= now {
                due.push(t);
            } else {
                remaining.push(t);
            }
        }
        self.tasks = remaining;
        due.sort_by_key(|t| (t.due, t.handle.0));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
