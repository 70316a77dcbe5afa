//! Round-robin dispatcher over replicated predictors.
//!
//! `PredictorPool` owns N [`Replica`]s built eagerly from one shared
//! config, assigns submissions round-robin, and guarantees single-flight
//! execution per replica. Results come back two ways:
//!
//! - [`submit`](PredictorPool::submit) returns a [`PredictionHandle`] —
//!   await it wherever, in whatever order.
//! - [`submit_ordered`](PredictorPool::submit_ordered) +
//!   [`pop_ordered`](PredictorPool::pop_ordered) deliver results in exact
//!   submission order regardless of completion order, for callers that
//!   reassemble positional outputs (image tiles and the like) without
//!   tracking input identifiers.
//!
//! Submission never blocks on execution; only retrieval blocks.

use crate::config::PoolConfig;
use crate::fixed_pool::FixedTaskPool;
use crate::handle::{completion_pair, PredictionHandle};
use crate::replica::Replica;
use parking_lot::Mutex;
use predpool_core::error::{PoolError, Result};
use predpool_core::pool::TaskPool;
use predpool_core::predictor::Predictor;
use predpool_core::{kinfo, kwarn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct PredictorPool<P: Predictor, W: TaskPool = FixedTaskPool> {
    /// Fixed at construction; replica lifetime == dispatcher lifetime.
    replicas: Vec<Arc<Replica<P>>>,
    /// Monotonic submission counter; target replica = counter mod N.
    next_index: AtomicUsize,
    /// Completion handles in exact submission order.
    ordered: Mutex<VecDeque<PredictionHandle<P::Output>>>,
    pool: Arc<W>,
    /// Only the constructor that built the pool shuts it down on drop.
    owns_pool: bool,
}

impl<P: Predictor> PredictorPool<P, FixedTaskPool> {
    /// Build a dispatcher with its own task pool, one thread per replica.
    ///
    /// Construction is eager and all-or-nothing: if any replica fails to
    /// build, the error is returned and nothing is handed out.
    pub fn new(config: P::Config, pool_cfg: PoolConfig) -> Result<Self> {
        pool_cfg
            .validate()
            .map_err(|e| PoolError::Construction(e.into()))?;
        let pool = Arc::new(FixedTaskPool::named(
            pool_cfg.replicas,
            pool_cfg.queue_depth,
            &pool_cfg.name,
        ));
        let mut this = Self::with_pool(config, pool_cfg, pool)?;
        this.owns_pool = true;
        Ok(this)
    }
}

impl<P: Predictor, W: TaskPool> std::fmt::Debug for PredictorPool<P, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorPool")
            .field("replicas", &self.replicas.len())
            .field("owns_pool", &self.owns_pool)
            .finish_non_exhaustive()
    }
}

impl<P: Predictor, W: TaskPool> PredictorPool<P, W> {
    /// Build a dispatcher over a caller-provided task pool. The pool may
    /// be shared with other dispatchers; it is not shut down on drop.
    pub fn with_pool(config: P::Config, pool_cfg: PoolConfig, pool: Arc<W>) -> Result<Self> {
        pool_cfg
            .validate()
            .map_err(|e| PoolError::Construction(e.into()))?;

        let mut replicas = Vec::with_capacity(pool_cfg.replicas);
        for id in 0..pool_cfg.replicas {
            replicas.push(Arc::new(Replica::build(id, &config)?));
        }
        kinfo!(
            "predictor pool up: {} replicas, {} pool threads",
            replicas.len(),
            pool.threads()
        );

        Ok(Self {
            replicas,
            next_index: AtomicUsize::new(0),
            ordered: Mutex::new(VecDeque::new()),
            pool,
            owns_pool: false,
        })
    }

    /// Number of replicas.
    pub fn replicas(&self) -> usize {
        self.replicas.len()
    }

    /// Unretrieved ordered results. Snapshot; may be stale.
    pub fn ordered_len(&self) -> usize {
        self.ordered.lock().len()
    }

    /// Submit one input; returns immediately with a handle.
    ///
    /// On `Err`, the input was not accepted and the handle does not exist;
    /// resubmit if desired. Failures of the prediction itself are carried
    /// on the handle, never here.
    pub fn submit(&self, input: P::Input) -> Result<PredictionHandle<P::Output>> {
        let target = self.next_index.fetch_add(1, Ordering::Relaxed) % self.replicas.len();
        let replica = &self.replicas[target];

        let (handle, promise) = completion_pair();
        replica.enqueue(input, promise);

        // Whoever flips in_flight false→true owns scheduling the drain.
        if replica.arm() {
            let r = Arc::clone(replica);
            if let Err(e) = self.pool.submit(Box::new(move || r.drain())) {
                kwarn!("replica {}: drain job rejected: {}", target, e);
                // We armed but cannot drain; fail everything queued here
                // rather than strand it (dropped promises resolve their
                // handles with HandleBroken).
                replica.abort_pending();
                return Err(e);
            }
        }

        Ok(handle)
    }

    /// Submit one input and park its handle on the submission-order queue
    /// for later retrieval via [`pop_ordered`](Self::pop_ordered).
    pub fn submit_ordered(&self, input: P::Input) -> Result<()> {
        let handle = self.submit(input)?;
        self.ordered.lock().push_back(handle);
        Ok(())
    }

    /// Retrieve the oldest *submitted* (not oldest finished) outstanding
    /// result, blocking until it resolves. `None` when nothing is
    /// outstanding — never blocks forever on an empty queue.
    pub fn pop_ordered(&self) -> Option<Result<P::Output>> {
        // Lock only for the pop; waiting happens outside so concurrent
        // submitters are not held up.
        let handle = self.ordered.lock().pop_front()?;
        Some(handle.wait())
    }
}

impl<P: Predictor, W: TaskPool> Drop for PredictorPool<P, W> {
    fn drop(&mut self) {
        // Unretrieved ordered results are awaited and discarded; failures
        // are reported, not propagated.
        while let Some(handle) = { self.ordered.lock().pop_front() } {
            if let Err(e) = handle.wait() {
                kwarn!("discarding failed result at teardown: {}", e);
            }
        }

        // Condvar wait, not a poll loop: each drain job signals idle as
        // it exits.
        for replica in &self.replicas {
            replica.wait_idle();
        }

        if self.owns_pool {
            self.pool.shutdown();
        }
    }
}
