//! Dispatcher configuration

use predpool_core::env::env_get;

/// Upper bound on replicas; each one owns a predictor instance and a
/// task-pool thread, so this is a sanity limit, not a tuning knob.
pub const MAX_REPLICAS: usize = 64;

/// Default task-pool queue depth.
pub const DEFAULT_QUEUE_DEPTH: usize = 1024;

/// Configuration for a [`PredictorPool`](crate::PredictorPool).
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker replicas (defaults to CPU count).
    pub replicas: usize,

    /// Capacity of the owned task pool's work queue. Only drain jobs land
    /// there — at most one per replica is live — so the default is never a
    /// practical limit.
    pub queue_depth: usize,

    /// Worker thread name prefix for the owned task pool; threads are
    /// named `{name}-worker-{i}`.
    pub name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        let num_cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            replicas: num_cpus.min(MAX_REPLICAS),
            queue_depth: DEFAULT_QUEUE_DEPTH,
            name: "predpool".to_string(),
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `PP_REPLICAS` / `PP_QUEUE_DEPTH` / `PP_NAME`.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            replicas: env_get("PP_REPLICAS", d.replicas),
            queue_depth: env_get("PP_QUEUE_DEPTH", d.queue_depth),
            name: env_get("PP_NAME", d.name),
        }
    }

    /// Set the number of replicas.
    pub fn replicas(mut self, n: usize) -> Self {
        self.replicas = n;
        self
    }

    /// Set the owned task pool's queue depth.
    pub fn queue_depth(mut self, n: usize) -> Self {
        self.queue_depth = n;
        self
    }

    /// Set the worker thread name prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.replicas == 0 {
            return Err("replicas must be at least 1");
        }
        if self.replicas > MAX_REPLICAS {
            return Err("replicas exceeds maximum");
        }
        if self.queue_depth < self.replicas {
            return Err("queue_depth must be at least replicas");
        }
        if self.name.is_empty() {
            return Err("name must not be empty");
        }
        Ok(())
    }
}
