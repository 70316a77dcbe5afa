//! Submit/wait throughput across replica counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use predpool::{PoolConfig, Predictor, PredictorPool, Result};

const BATCH: usize = 256;

/// A few hundred nanoseconds of arithmetic per call.
struct Spin;

impl Predictor for Spin {
    type Config = ();
    type Input = u64;
    type Output = u64;

    fn build(_: &()) -> Result<Self> {
        Ok(Spin)
    }

    fn predict(&mut self, input: u64) -> Result<u64> {
        let mut acc = input;
        for _ in 0..200 {
            acc = acc.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        }
        Ok(acc)
    }
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(BATCH as u64));

    for replicas in [1usize, 2, 4] {
        let pool =
            PredictorPool::<Spin>::new((), PoolConfig::new().replicas(replicas)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(replicas),
            &replicas,
            |b, _| {
                b.iter(|| {
                    let handles: Vec<_> =
                        (0..BATCH as u64).map(|i| pool.submit(i).unwrap()).collect();
                    for h in handles {
                        h.wait().unwrap();
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
