//! `FixedTaskPool` — default `TaskPool` implementation.
//!
//! Spawns N OS threads at creation. Jobs land in a bounded lock-free MPMC
//! queue; idle workers sleep on a condvar and are woken per push. No
//! dynamic scaling. Simple, predictable, safe.
//!
//! Shutdown is graceful: every job accepted before `shutdown()` runs to
//! completion before the workers exit.

use parking_lot::{Condvar, Mutex};
use predpool_core::error::{PoolError, Result};
use predpool_core::pool::{Job, TaskPool};

use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Shared state between submitters and workers.
struct PoolInner {
    /// Work queue: submitters → workers.
    jobs: ArrayQueue<Job>,
    /// Pairs with `idle_cond`; held only around sleep/wake transitions.
    idle_lock: Mutex<()>,
    idle_cond: Condvar,
    /// Number of workers currently executing a job.
    active: AtomicUsize,
    /// Shutdown flag.
    shutdown: AtomicBool,
    /// Total worker count.
    total: usize,
}

pub struct FixedTaskPool {
    inner: Arc<PoolInner>,
    handles: Mutex<Vec<thread::JoinHandle<()>>>,
}

impl FixedTaskPool {
    /// Create a pool with `n` workers named `predpool-worker-{i}`.
    ///
    /// `queue_depth`: max pending jobs before `submit` fails.
    pub fn new(n: usize, queue_depth: usize) -> Self {
        Self::named(n, queue_depth, "predpool")
    }

    /// Create a pool whose worker threads are named `{prefix}-worker-{i}`.
    pub fn named(n: usize, queue_depth: usize, prefix: &str) -> Self {
        let n = n.clamp(1, 64);
        let inner = Arc::new(PoolInner {
            jobs: ArrayQueue::new(queue_depth.max(n)),
            idle_lock: Mutex::new(()),
            idle_cond: Condvar::new(),
            active: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
            total: n,
        });

        let mut handles = Vec::with_capacity(n);
        for worker_id in 0..n {
            let inner = Arc::clone(&inner);
            let handle = thread::Builder::new()
                .name(format!("{}-worker-{}", prefix, worker_id))
                .spawn(move || worker_loop(inner, worker_id))
                .expect("failed to spawn worker thread");
            handles.push(handle);
        }

        FixedTaskPool {
            inner,
            handles: Mutex::new(handles),
        }
    }

    /// Number of workers currently executing a job.
    pub fn active_workers(&self) -> usize {
        self.inner.active.load(Ordering::Relaxed)
    }
}

impl TaskPool for FixedTaskPool {
    fn submit(&self, job: Job) -> Result<()> {
        if self.inner.shutdown.load(Ordering::Acquire) {
            return Err(PoolError::Shutdown);
        }
        self.inner
            .jobs
            .push(job)
            .map_err(|_| PoolError::SubmissionRejected)?;
        // Notify under the lock so a worker between its empty-check and
        // its wait cannot miss the wakeup.
        let _guard = self.inner.idle_lock.lock();
        self.inner.idle_cond.notify_one();
        Ok(())
    }

    fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::SeqCst);
        {
            let _guard = self.inner.idle_lock.lock();
            self.inner.idle_cond.notify_all();
        }
        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            let _ = handle.join();
        }
    }

    fn threads(&self) -> usize {
        self.inner.total
    }
}

impl Drop for FixedTaskPool {
    fn drop(&mut self) {
        // Idempotent: a second call finds an empty handle list.
        self.shutdown();
    }
}

/// Worker thread main loop.
fn worker_loop(inner: Arc<PoolInner>, _worker_id: usize) {
    loop {
        if let Some(job) = inner.jobs.pop() {
            inner.active.fetch_add(1, Ordering::Relaxed);
            job();
            inner.active.fetch_sub(1, Ordering::Relaxed);
            continue;
        }

        let mut guard = inner.idle_lock.lock();
        // Re-check under the lock: a push may have raced the pop above.
        if !inner.jobs.is_empty() {
            continue;
        }
        // Exit only once the queue is drained — accepted jobs complete.
        if inner.shutdown.load(Ordering::Acquire) {
            break;
        }
        inner.idle_cond.wait(&mut guard);
    }
}
