//! One-shot completion handles.
//!
//! A submission returns a [`PredictionHandle`]; the replica that executes
//! the task holds the matching [`Promise`]. Exactly one write and exactly
//! one read — both enforced by consuming `self`, so double-resolve and
//! double-wait are compile errors rather than runtime ones.
//!
//! A `Promise` dropped without resolving writes `HandleBroken` into the
//! cell, so a waiter can never block forever on an abandoned task.

use parking_lot::{Condvar, Mutex};
use predpool_core::error::{PoolError, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

enum State<T> {
    Pending,
    Ready(Result<T>),
}

struct Cell<T> {
    state: Mutex<State<T>>,
    cond: Condvar,
}

/// Create a linked handle/promise pair.
pub(crate) fn completion_pair<T>() -> (PredictionHandle<T>, Promise<T>) {
    let cell = Arc::new(Cell {
        state: Mutex::new(State::Pending),
        cond: Condvar::new(),
    });
    (
        PredictionHandle {
            cell: Arc::clone(&cell),
        },
        Promise { cell: Some(cell) },
    )
}

/// Consumer half: await one task's result.
pub struct PredictionHandle<T> {
    cell: Arc<Cell<T>>,
}

impl<T> std::fmt::Debug for PredictionHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionHandle").finish_non_exhaustive()
    }
}

impl<T> PredictionHandle<T> {
    /// Block until the task resolves; returns its result or failure.
    ///
    /// Consumes the handle — a result can be retrieved exactly once.
    pub fn wait(self) -> Result<T> {
        let mut state = self.cell.state.lock();
        loop {
            if let State::Ready(r) = std::mem::replace(&mut *state, State::Pending) {
                return r;
            }
            self.cell.cond.wait(&mut state);
        }
    }

    /// Bounded-wait variant. On timeout the handle is returned so the
    /// caller can retry later.
    pub fn wait_timeout(self, timeout: Duration) -> std::result::Result<Result<T>, Self> {
        let deadline = Instant::now() + timeout;
        {
            let mut state = self.cell.state.lock();
            loop {
                if let State::Ready(r) = std::mem::replace(&mut *state, State::Pending) {
                    return Ok(r);
                }
                if self.cell.cond.wait_until(&mut state, deadline).timed_out() {
                    // One last check: resolve and timeout can race.
                    if let State::Ready(r) = std::mem::replace(&mut *state, State::Pending) {
                        return Ok(r);
                    }
                    break;
                }
            }
        }
        Err(self)
    }

    /// Non-blocking readiness probe. May be stale by the time the caller
    /// acts on it.
    pub fn is_ready(&self) -> bool {
        matches!(*self.cell.state.lock(), State::Ready(_))
    }
}

/// Producer half: resolve one task's result.
pub(crate) struct Promise<T> {
    cell: Option<Arc<Cell<T>>>,
}

impl<T> Promise<T> {
    /// Write the result and wake the waiter. Consumes the promise.
    pub(crate) fn resolve(mut self, value: Result<T>) {
        if let Some(cell) = self.cell.take() {
            let mut state = cell.state.lock();
            *state = State::Ready(value);
            cell.cond.notify_all();
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.take() {
            let mut state = cell.state.lock();
            if matches!(*state, State::Pending) {
                *state = State::Ready(Err(PoolError::HandleBroken));
                cell.cond.notify_all();
            }
        }
    }
}
