//! Basic predpool example
//!
//! Submits a batch through the ordered API and retrieves results in
//! submission order, with a predictor that fakes per-call latency.
//!
//! # Environment Variables
//!
//! - `PP_REPLICAS=<n>` - Number of replicas (default: CPU count)
//! - `PP_LOG_LEVEL=debug` - Set log level (off, error, warn, info, debug, trace)

use predpool::{kinfo, PoolConfig, Predictor, PredictorPool, Result};
use std::thread;
use std::time::{Duration, Instant};

/// Stand-in for a real inference backend: ~20ms per call, doubles input.
struct SlowDoubler;

impl Predictor for SlowDoubler {
    type Config = ();
    type Input = i64;
    type Output = i64;

    fn build(_: &()) -> Result<Self> {
        Ok(SlowDoubler)
    }

    fn predict(&mut self, input: i64) -> Result<i64> {
        thread::sleep(Duration::from_millis(20));
        Ok(input * 2)
    }
}

fn main() {
    println!("=== predpool basic example ===\n");

    let config = PoolConfig::from_env();
    let replicas = config.replicas;

    let pool = PredictorPool::<SlowDoubler>::new((), config).expect("pool construction");
    kinfo!("submitting 32 inputs across {} replicas", replicas);

    let start = Instant::now();
    for i in 0..32 {
        pool.submit_ordered(i).expect("submit");
    }

    let mut results = Vec::new();
    while let Some(result) = pool.pop_ordered() {
        results.push(result.expect("predict"));
    }
    let elapsed = start.elapsed();

    println!("results (submission order): {:?}", results);
    println!(
        "32 x 20ms of work on {} replicas took {:.0}ms",
        replicas,
        elapsed.as_secs_f64() * 1000.0
    );
}
