use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use printstate_core::StabilityEstimator;

// Print-time estimates converging on `target` with decaying jitter.
fn synth_estimates(n: usize, target: f64, seed: u64) -> Vec<f64> {
    let mut state = seed.max(1);
    let mut next_unit = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|i| {
            let decay = 1.0 / (1.0 + i as f64 / 500.0);
            target + (next_unit() * 2.0 - 1.0) * 600.0 * decay
        })
        .collect()
}

pub fn bench_update(c: &mut Criterion) {
    let mut g = c.benchmark_group("estimator_update");
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p printstate_core --bench estimator
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let trace = synth_estimates(20_000, 3_600.0, 0xC0FFEE);

    for &window in &[10usize, 250, 2_000] {
        g.bench_function(format!("window_{window}"), |b| {
            b.iter_batched(
                || StabilityEstimator::new(window, 250, 0.1).unwrap(),
                |mut est| {
                    for &s in &trace {
                        black_box(est.update(black_box(s)).unwrap());
                    }
                    black_box(est.is_stable());
                },
                BatchSize::SmallInput,
            )
        });
    }
    g.finish();
}

criterion_group!(estimator, bench_update);
criterion_main!(estimator);
