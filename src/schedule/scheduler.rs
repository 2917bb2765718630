//! Cancellable one-shot and periodic tasks on a logical clock.

use serde::{Deserialize, Serialize};

use crate::core::timing::Millis;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

impl TimerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    due: Millis,
    /// Scheduling order; breaks ties between equal due times.
    seq: u64,
    period: Option<Millis>,
    task: T,
}

/// A task whose due time has been reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub due: Millis,
    pub task: T,
}

/// Pending tasks owned by one round.
///
/// Nothing runs on its own: the owner asks for due tasks with
/// [`Scheduler::pop_due`] as it advances its clock. Tasks come out in
/// due-time order, ties in the order they were scheduled. Periodic tasks
/// are re-armed each time they fire until cancelled.
///
/// ```
/// use rust_pairs::schedule::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.after(0, 1_000, "close");
/// let tick = scheduler.every(0, 400, "tick");
///
/// let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(1_000))
///     .map(|f| (f.due, f.task))
///     .collect();
/// assert_eq!(fired, vec![(400, "tick"), (800, "tick"), (1_000, "close")]);
///
/// assert!(scheduler.cancel(tick));
/// assert!(scheduler.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u32,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, due: Millis, period: Option<Millis>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due,
            seq,
            period,
            task,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Run `task` once, `delay` after `now`.
    pub fn after(&mut self, now: Millis, delay: Millis, task: T) -> TimerId {
        self.push(now + delay, None, task)
    }

    /// Run `task` every `interval`, first at `now + interval`.
    pub fn every(&mut self, now: Millis, interval: Millis, task: T) -> TimerId {
        assert!(interval > 0, "Periodic interval must be positive");
        self.push(now + interval, Some(interval), task)
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every task matching `predicate`. Returns how many were removed.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.task));
        before - self.entries.len()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check whether a task is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Take the earliest task due at or before `until`.
    ///
    /// One-shot tasks are removed; periodic tasks are re-armed one
    /// interval after the due time that just fired.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<T>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                let fired = Fired {
                    id: entry.id,
                    due: entry.due,
                    task: entry.task.clone(),
                };
                entry.due += period;
                entry.seq = seq;
                Some(fired)
            }
            None => {
                let entry = self.entries.remove(index);
                Some(Fired {
                    id: entry.id,
                    due: entry.due,
                    task: entry.task,
                })
            }
        }
    }
}
