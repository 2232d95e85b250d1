use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    time::{Duration, Instant},
};

/// Fire-once deferred execution of application tasks.
///
/// A scheduled task is delivered back to the application once `delay` has
/// elapsed. Scheduled tasks cannot be cancelled; tasks that may become stale
/// should carry enough context to recognize that when they fire.
pub trait Scheduler<T> {
    fn schedule(&mut self, delay: Duration, task: T);
}

#[derive(Debug)]
struct Entry<T> {
    deadline: Instant,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so that `BinaryHeap` pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.deadline, other.seq).cmp(&(self.deadline, self.seq))
    }
}

/// Pending tasks ordered by deadline.
///
/// Tasks with the same deadline fire in the order they were pushed.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, deadline: Instant, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            deadline,
            seq,
            task,
        });
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    /// Removes and returns the earliest task whose deadline is not after `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|entry| entry.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_deadline_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.push(now + Duration::from_millis(30), "c");
        queue.push(now + Duration::from_millis(10), "a");
        queue.push(now + Duration::from_millis(20), "b");
        assert_eq!(queue.len(), 3);

        let later = now + Duration::from_secs(1);
        assert_eq!(queue.pop_due(later), Some("a"));
        assert_eq!(queue.pop_due(later), Some("b"));
        assert_eq!(queue.pop_due(later), Some("c"));
        assert_eq!(queue.pop_due(later), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_deadline_is_fifo() {
        let deadline = Instant::now();
        let mut queue = TimerQueue::new();
        for i in 0..5 {
            queue.push(deadline, i);
        }
        let popped: Vec<_> = std::iter::from_fn(|| queue.pop_due(deadline)).collect();
        assert_eq!(popped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_not_due_yet() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.push(now + Duration::from_millis(100), ());
        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.next_deadline(), Some(now + Duration::from_millis(100)));
        assert_eq!(queue.pop_due(now + Duration::from_millis(100)), Some(()));
    }
}
