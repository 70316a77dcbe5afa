//! # predpool-core — Trait definitions for predpool
//!
//! This crate defines the seams between the dispatcher and everything it
//! does not own: the predictor being replicated and the thread pool that
//! runs drain jobs. Concrete implementations live in `predpool`; consumers
//! with their own thread pool implement [`TaskPool`] and plug it in.
//!
//! ## Design principle
//!
//! > "Program to the interface. The dispatcher never names a concrete
//! >  predictor or pool type."
//!
//! ## Modules
//!
//! - `predictor` - The replicated-computation capability
//! - `pool` - Task pool trait (drain-job executor)
//! - `error` - Error types
//! - `env` - Environment variable utilities
//! - `kprint` - Kernel-style debug printing macros

pub mod predictor;
pub mod pool;
pub mod error;
pub mod env;
pub mod kprint;

// Re-exports for convenience
pub use predictor::Predictor;
pub use pool::{Job, TaskPool};
pub use error::{PoolError, Result};
pub use env::{env_get, env_get_bool, env_get_opt, env_is_set};
pub use kprint::{set_log_level, LogLevel};
