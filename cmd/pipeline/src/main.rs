//! Producer/consumer pipeline example
//!
//! Two producer threads push tile jobs into a `BlockingDeque`; the main
//! thread drains it into a `PredictorPool` and reassembles the outputs
//! positionally — the pattern the ordered API exists for (think image
//! tiles sliced off one frame).

use predpool::{kinfo, BlockingDeque, PoolConfig, Predictor, PredictorPool, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TILES_PER_PRODUCER: usize = 16;

/// Pretend tile shader: checksum of the tile bytes after fake work.
struct TileShader;

impl Predictor for TileShader {
    type Config = ();
    type Input = Vec<u8>;
    type Output = u64;

    fn build(_: &()) -> Result<Self> {
        Ok(TileShader)
    }

    fn predict(&mut self, tile: Vec<u8>) -> Result<u64> {
        thread::sleep(Duration::from_millis(5));
        Ok(tile.iter().map(|&b| b as u64).sum())
    }
}

fn main() {
    println!("=== predpool pipeline example ===\n");

    let deque = Arc::new(BlockingDeque::new());

    // Producers: slice "frames" into tiles and hand them off.
    let mut producers = Vec::new();
    for p in 0..2u8 {
        let deque = Arc::clone(&deque);
        producers.push(thread::spawn(move || {
            for i in 0..TILES_PER_PRODUCER {
                let tile = vec![p.wrapping_add(i as u8); 64];
                deque.push_back(tile);
                thread::sleep(Duration::from_millis(2));
            }
        }));
    }

    let pool = PredictorPool::<TileShader>::new((), PoolConfig::from_env().replicas(3))
        .expect("pool construction");

    // Consumer: drain the hand-off buffer into the pool in arrival order.
    let total = 2 * TILES_PER_PRODUCER;
    for _ in 0..total {
        let tile = deque.pop_front_blocking();
        pool.submit_ordered(tile).expect("submit");
    }
    kinfo!("all {} tiles submitted, {} pending", total, pool.ordered_len());

    // Reassemble: pop_ordered yields results in submission order, so the
    // checksums line up with the tiles positionally.
    let mut checksums = Vec::with_capacity(total);
    while let Some(result) = pool.pop_ordered() {
        checksums.push(result.expect("predict"));
    }

    for producer in producers {
        producer.join().unwrap();
    }

    println!("reassembled {} tile checksums", checksums.len());
    println!("first 8: {:?}", &checksums[..8]);
}
