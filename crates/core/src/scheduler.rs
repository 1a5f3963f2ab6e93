//! Delayed tasks keyed by generation.
//!
//! Tasks are stamped with the [`Generation`] they were scheduled under and a
//! due time on the scheduler's own millisecond clock. Due tasks come out in
//! due order (ties keep scheduling order). Tasks from an older generation are
//! dropped instead of returned.

use crate::sequencer::Generation;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_ms: u64,
    seq: u64,
    generation: Generation,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run `task` `delay_ms` from now, unless `generation` goes stale first.
    pub fn schedule(&mut self, delay_ms: u32, generation: Generation, task: T) {
        let entry = Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms as u64),
            seq: self.next_seq,
            generation,
            task,
        };
        self.next_seq = self.next_seq.wrapping_add(1);

        // Keep sorted by (due, seq) so popping from the front is in order.
        let pos = self
            .tasks
            .partition_point(|t| (t.due_ms, t.seq) <= (entry.due_ms, entry.seq));
        self.tasks.insert(pos, entry);
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms as u64);
    }

    /// Next due task that is still live. Stale tasks are discarded on the way.
    pub fn pop_due(&mut self, live: Generation) -> Option<T> {
        while let Some(first) = self.tasks.first() {
            if first.due_ms > self.now_ms {
                return None;
            }
            let entry = self.tasks.remove(0);
            if entry.generation == live {
                return Some(entry.task);
            }
        }
        None
    }

    /// Drop every task not belonging to `live`.
    pub fn retain_live(&mut self, live: Generation) {
        self.tasks.retain(|t| t.generation == live);
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
