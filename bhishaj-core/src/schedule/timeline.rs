//! Virtual-clock priority queue

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Entry<T> {
    due: Duration,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A queue of items that become due at points on a virtual clock
///
/// Items fire in order of due time; items due at the same instant fire in
/// the order they were scheduled. The clock only moves forward.
pub struct Timeline<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Timeline<T> {
    /// Create an empty timeline at time zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `item` to become due `delay` after the current time.
    /// Returns the absolute due time.
    pub fn schedule_in(&mut self, delay: Duration, item: T) -> Duration {
        let due = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, item }));
        due
    }

    /// Due time of the earliest pending item
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Move the clock forward by `by` and pop everything now due
    pub fn advance_by(&mut self, by: Duration) -> Vec<T> {
        let target = self.now + by;
        self.advance_to(target)
    }

    /// Move the clock to `target` and pop everything due at or before it.
    /// A target in the past pops what is already due without rewinding.
    pub fn advance_to(&mut self, target: Duration) -> Vec<T> {
        if target > self.now {
            self.now = target;
        }

        let mut fired = Vec::new();
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due > self.now {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                fired.push(entry.item);
            }
        }
        fired
    }

    /// Jump to the last due time and pop everything
    pub fn drain(&mut self) -> Vec<T> {
        let last = self
            .queue
            .iter()
            .map(|Reverse(entry)| entry.due)
            .max()
            .unwrap_or(self.now);
        self.advance_to(last)
    }

    /// Drop pending items that do not satisfy `keep`
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let entries = std::mem::take(&mut self.queue).into_vec();
        self.queue = entries
            .into_iter()
            .filter(|Reverse(entry)| keep(&entry.item))
            .collect();
    }

    /// Iterate over pending items in no particular order
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(|Reverse(entry)| &entry.item)
    }

    /// Number of pending items
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Timeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish()
    }
}
