//! The replicated-computation capability.
//!
//! A `Predictor` is a stateful computation that is NOT safe to invoke
//! concurrently on one instance, but is safe across distinct instances.
//! The dispatcher builds N instances from one shared config and guarantees
//! at most one in-flight `predict` call per instance (single-flight).
//!
//! `predict` takes `&mut self` so the non-reentrancy contract is enforced
//! by the compiler instead of by documentation.

use crate::error::Result;

/// A computation replicated across a dispatcher's worker replicas.
///
/// **Contract:**
/// - `build()` may be slow (model load, device handle acquisition). It runs
///   once per replica at dispatcher construction; a failure there is fatal
///   to the whole dispatcher.
/// - `predict()` may block its worker thread for as long as it likes.
///   A failure is recorded on that one task's handle and never aborts the
///   replica's drain loop.
/// - Instances never migrate between replicas and are never shared.
pub trait Predictor: Send + Sized + 'static {
    /// Shared construction parameters (model path, device options, ...).
    type Config: Clone + Send + Sync + 'static;
    /// One unit of work.
    type Input: Send + 'static;
    /// The outcome of one unit of work.
    type Output: Send + 'static;

    /// Build one private instance from the shared config.
    fn build(config: &Self::Config) -> Result<Self>;

    /// Run the computation on one input.
    fn predict(&mut self, input: Self::Input) -> Result<Self::Output>;
}
