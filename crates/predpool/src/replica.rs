//! Worker replica: one predictor instance plus its pending-task queue.
//!
//! Access to the predictor is serialized by the single-flight protocol:
//! at most one drain job per replica is ever scheduled or running. The
//! `in_flight` flag plus the queue mutex carry the whole handshake:
//!
//! - A submitter enqueues first, then CASes `in_flight` false→true. The
//!   CAS winner — and only the winner — schedules a drain job.
//! - The drain job pops tasks until the queue is empty, and clears
//!   `in_flight` in the *same* critical section that observed emptiness.
//!   A submission racing with that exit therefore either lands before the
//!   final emptiness check (and is drained), or observes the cleared flag
//!   and wins the CAS itself.

use crate::handle::Promise;
use parking_lot::{Condvar, Mutex};
use predpool_core::error::{PoolError, Result};
use predpool_core::predictor::Predictor;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) struct Replica<P: Predictor> {
    pub(crate) id: usize,
    /// Uncontended by the single-flight protocol. The lock is the
    /// compiler-visible proof of exclusive access, not arbitration.
    predictor: Mutex<P>,
    /// Input and promise travel as one pair; lock-step is structural.
    queue: Mutex<VecDeque<(P::Input, Promise<P::Output>)>>,
    /// True while a drain job is scheduled or running.
    in_flight: AtomicBool,
    /// Notified (with the queue lock held) whenever `in_flight` clears.
    idle: Condvar,
}

impl<P: Predictor> Replica<P> {
    pub(crate) fn build(id: usize, config: &P::Config) -> Result<Self> {
        let predictor = P::build(config).map_err(|e| match e {
            e @ PoolError::Construction(_) => e,
            other => PoolError::Construction(other.to_string()),
        })?;
        Ok(Self {
            id,
            predictor: Mutex::new(predictor),
            queue: Mutex::new(VecDeque::new()),
            in_flight: AtomicBool::new(false),
            idle: Condvar::new(),
        })
    }

    pub(crate) fn enqueue(&self, input: P::Input, promise: Promise<P::Output>) {
        self.queue.lock().push_back((input, promise));
    }

    /// CAS `in_flight` false→true. The winner must schedule a drain job
    /// (or call `abort_pending` if it cannot).
    pub(crate) fn arm(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Drain job body. Runs on a task-pool thread, at most one per replica.
    pub(crate) fn drain(&self) {
        loop {
            let (input, promise) = {
                let mut queue = self.queue.lock();
                match queue.pop_front() {
                    Some(pair) => pair,
                    None => {
                        // Emptiness check and flag clear in one critical
                        // section — the fix for the lost-wakeup race.
                        self.in_flight.store(false, Ordering::Release);
                        self.idle.notify_all();
                        return;
                    }
                }
            };

            // Lock released: the predict call may be slow and must not
            // block submitters.
            let result = {
                let mut predictor = self.predictor.lock();
                catch_unwind(AssertUnwindSafe(|| predictor.predict(input))).unwrap_or_else(
                    |_| Err(PoolError::Predict(format!("replica {} panicked", self.id))),
                )
            };
            promise.resolve(result);
        }
    }

    /// Fail every queued task and disarm. Used by the CAS winner when the
    /// task pool refuses the drain job: dropping the promises resolves
    /// their handles with `HandleBroken` instead of stranding them.
    pub(crate) fn abort_pending(&self) {
        let mut queue = self.queue.lock();
        queue.clear();
        self.in_flight.store(false, Ordering::Release);
        self.idle.notify_all();
    }

    /// Block until no drain job is scheduled or running.
    pub(crate) fn wait_idle(&self) {
        let mut queue = self.queue.lock();
        while self.in_flight.load(Ordering::Acquire) {
            self.idle.wait(&mut queue);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}
