//! Time-based rate limiting and deferred work
//!
//! All times are offsets from page start. Nothing here reads a clock; the
//! caller passes `now` in and drains due work explicitly.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Leading-edge throttle: the first call runs, further calls are dropped
/// until `limit` has passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now < last + self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Trailing-edge debounce: fires once, `wait` after the last call
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn call(&mut self, now: Duration) {
        self.deadline = Some(now + self.wait);
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns `true` once when the quiet period has elapsed
    pub fn fire_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Pending timeouts ordered by due time, then by scheduling order
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    tasks: Vec<(u64, T)>,
    seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            tasks: Vec::new(),
            seq: 0,
        }
    }

    pub fn schedule(&mut self, at: Duration, task: T) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse((at, seq)));
        self.tasks.push((seq, task));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse((at, _))| *at)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return the earliest task due at or before `now`, with its
    /// due time
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        let Reverse((at, seq)) = *self.heap.peek()?;
        if at > now {
            return None;
        }
        self.heap.pop();
        let index = self.tasks.iter().position(|(s, _)| *s == seq)?;
        Some((at, self.tasks.swap_remove(index).1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_throttle_leading_edge() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.ready(ms(0)));
        assert!(!throttle.ready(ms(5)));
        assert!(!throttle.ready(ms(15)));
        assert!(throttle.ready(ms(16)));
        assert!(!throttle.ready(ms(20)));
    }

    #[test]
    fn test_debounce_fires_once_after_quiet_period() {
        let mut debounce = Debounce::new(ms(250));
        debounce.call(ms(0));
        debounce.call(ms(100));
        debounce.call(ms(200));
        assert!(!debounce.fire_due(ms(300)));
        assert_eq!(debounce.deadline(), Some(ms(450)));
        assert!(debounce.fire_due(ms(450)));
        assert!(!debounce.fire_due(ms(1000)));
    }

    #[test]
    fn test_timer_queue_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(3000), "revert");
        queue.schedule(ms(1000), "clear");
        queue.schedule(ms(1000), "second");
        assert_eq!(queue.next_deadline(), Some(ms(1000)));

        assert_eq!(queue.pop_due(ms(999)), None);
        assert_eq!(queue.pop_due(ms(1000)), Some((ms(1000), "clear")));
        assert_eq!(queue.pop_due(ms(1000)), Some((ms(1000), "second")));
        assert_eq!(queue.pop_due(ms(2000)), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(ms(5000)), Some((ms(3000), "revert")));
        assert!(queue.is_empty());
    }
}
