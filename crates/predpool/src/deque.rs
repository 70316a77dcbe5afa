//! Blocking double-ended queue.
//!
//! Unbounded thread-safe deque for producer/consumer hand-off, typically
//! feeding a [`PredictorPool`](crate::PredictorPool) from ingest threads.
//! Blocking pops use a predicate loop around the condvar, so spurious
//! wakeups and multi-consumer races are handled.
//!
//! There is no built-in bound: keeping growth in check is the producer's
//! responsibility.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

pub struct BlockingDeque<T> {
    inner: Mutex<VecDeque<T>>,
    cond: Condvar,
}

impl<T> Default for BlockingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingDeque<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            cond: Condvar::new(),
        }
    }

    /// Append at the back and wake one waiter.
    pub fn push_back(&self, value: T) {
        let mut q = self.inner.lock();
        q.push_back(value);
        self.cond.notify_one();
    }

    /// Prepend at the front and wake one waiter.
    pub fn push_front(&self, value: T) {
        let mut q = self.inner.lock();
        q.push_front(value);
        self.cond.notify_one();
    }

    /// Block until non-empty, then remove and return the front element.
    pub fn pop_front_blocking(&self) -> T {
        let mut q = self.inner.lock();
        loop {
            if let Some(v) = q.pop_front() {
                return v;
            }
            self.cond.wait(&mut q);
        }
    }

    /// Block until non-empty, then remove and return the back element.
    pub fn pop_back_blocking(&self) -> T {
        let mut q = self.inner.lock();
        loop {
            if let Some(v) = q.pop_back() {
                return v;
            }
            self.cond.wait(&mut q);
        }
    }

    /// Non-blocking pop from the front.
    pub fn try_pop_front(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    /// Snapshot length. May be stale by the time the caller acts on it.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Snapshot emptiness check.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let dq = BlockingDeque::new();
        for i in 0..5 {
            dq.push_back(i);
        }
        for i in 0..5 {
            assert_eq!(dq.pop_front_blocking(), i);
        }
    }

    #[test]
    fn test_push_front_pop_back() {
        let dq = BlockingDeque::new();
        dq.push_front(1);
        dq.push_front(2);
        assert_eq!(dq.pop_back_blocking(), 1);
        assert_eq!(dq.pop_back_blocking(), 2);
    }

    #[test]
    fn test_try_pop_empty() {
        let dq = BlockingDeque::<u32>::new();
        assert!(dq.try_pop_front().is_none());
        assert!(dq.is_empty());
        assert_eq!(dq.len(), 0);
    }

    #[test]
    fn test_blocking_pop_waits_for_push() {
        let dq = Arc::new(BlockingDeque::new());
        let producer = {
            let dq = Arc::clone(&dq);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                dq.push_back(42);
            })
        };
        // Runs before the push; must block, then return the pushed value.
        assert_eq!(dq.pop_front_blocking(), 42);
        producer.join().unwrap();
    }

    #[test]
    fn test_blocking_pop_back_waits_for_push() {
        let dq = Arc::new(BlockingDeque::new());
        let producer = {
            let dq = Arc::clone(&dq);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                dq.push_front(7);
            })
        };
        assert_eq!(dq.pop_back_blocking(), 7);
        producer.join().unwrap();
    }

    #[test]
    fn test_many_producers_one_consumer() {
        let dq = Arc::new(BlockingDeque::new());
        let mut producers = Vec::new();
        for p in 0..4 {
            let dq = Arc::clone(&dq);
            producers.push(thread::spawn(move || {
                for i in 0..25 {
                    dq.push_back(p * 100 + i);
                }
            }));
        }

        let mut seen = Vec::with_capacity(100);
        for _ in 0..100 {
            seen.push(dq.pop_front_blocking());
        }
        for t in producers {
            t.join().unwrap();
        }

        assert!(dq.is_empty());
        // Per-producer FIFO survives interleaving.
        for p in 0..4 {
            let from_p: Vec<_> = seen.iter().filter(|v| *v / 100 == p).collect();
            assert_eq!(from_p.len(), 25);
            assert!(from_p.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
