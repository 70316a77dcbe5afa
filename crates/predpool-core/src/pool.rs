//! Task pool abstraction (drain-job executor).
//!
//! The dispatcher never spawns threads itself; it hands zero-argument jobs
//! to a `TaskPool`. Which thread runs a job, and in what order relative to
//! jobs for other replicas, is the pool's business.
//!
//! # Implementors
//!
//! - `FixedTaskPool` (default, in `predpool`): spawns N OS threads at
//!   creation, bounded work queue, condvar wake-on-push.
//!
//! - Anything else the embedding application already has — implement this
//!   trait over it and pass it to `PredictorPool::with_pool`.

use crate::error::Result;

/// A zero-argument unit of work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Executes jobs asynchronously on some thread.
///
/// **Contract:**
/// - `submit()` must never block the caller. If the pool cannot accept the
///   job it returns `Err(SubmissionRejected)` and the job is dropped
///   unexecuted.
/// - No ordering promise between submitted jobs.
/// - `shutdown()` blocks until every already-accepted job has run to
///   completion; jobs are never left half-executed. Submissions after
///   shutdown are rejected.
pub trait TaskPool: Send + Sync + 'static {
    /// Hand a job to the pool for asynchronous execution.
    fn submit(&self, job: Job) -> Result<()>;

    /// Gracefully shut down. Blocks until accepted jobs are done.
    fn shutdown(&self);

    /// Total number of pool threads.
    fn threads(&self) -> usize;
}
