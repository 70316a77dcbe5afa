//! # predpool — parallel predictor dispatcher
//!
//! Runs a stateful, non-reentrant computation across a fixed pool of
//! independent replicas so a stream of inputs can be serviced in parallel
//! without the caller managing threads, ordering, or replica lifecycle.
//!
//! ## Modules
//!
//! - `dispatcher` - Round-robin dispatcher (`PredictorPool`)
//! - `handle` - One-shot completion handles
//! - `fixed_pool` - Default task pool (`FixedTaskPool`)
//! - `deque` - Blocking double-ended queue for pipeline hand-off
//! - `config` - Dispatcher configuration
//!
//! ## Quick start
//!
//! ```ignore
//! use predpool::{PoolConfig, PredictorPool, Predictor, Result};
//!
//! struct Doubler;
//! impl Predictor for Doubler {
//!     type Config = ();
//!     type Input = i64;
//!     type Output = i64;
//!     fn build(_: &()) -> Result<Self> { Ok(Doubler) }
//!     fn predict(&mut self, x: i64) -> Result<i64> { Ok(x * 2) }
//! }
//!
//! let pool = PredictorPool::<Doubler>::new((), PoolConfig::new().replicas(3))?;
//! for i in 0..9 {
//!     pool.submit_ordered(i)?;
//! }
//! while let Some(result) = pool.pop_ordered() {
//!     println!("{}", result?);
//! }
//! ```

pub mod config;
pub mod deque;
pub mod dispatcher;
pub mod fixed_pool;
pub mod handle;
mod replica;

// Re-exports for convenience
pub use config::PoolConfig;
pub use deque::BlockingDeque;
pub use dispatcher::PredictorPool;
pub use fixed_pool::FixedTaskPool;
pub use handle::PredictionHandle;
pub use predpool_core::{Job, PoolError, Predictor, Result, TaskPool};
pub use predpool_core::{kdebug, kerror, kinfo, kwarn, set_log_level, LogLevel};
