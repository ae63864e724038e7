#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for integration and frame rendering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use riemann_viz::prelude::*;
use std::hint::black_box;

fn integrate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate");

    for partitions in [15, 1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(partitions),
            &partitions,
            |b, &partitions| {
                let mut engine = QuadratureEngine::seeded(0);
                let mut flip = false;
                b.iter(|| {
                    // Alternate the upper bound so every call misses the cache.
                    flip = !flip;
                    let upper = if flip { 2.0 } else { 2.5 };
                    engine
                        .integrate(
                            black_box(&Function::Sin2),
                            0.0,
                            upper,
                            partitions,
                            QuadratureRule::RandomInSubinterval,
                        )
                        .expect("partitions are nonzero")
                        .estimate()
                });
            },
        );
    }

    group.finish();
}

fn cached_integrate_benchmark(c: &mut Criterion) {
    let mut engine = QuadratureEngine::seeded(0);
    c.bench_function("integrate_cached", |b| {
        b.iter(|| {
            engine
                .integrate(&Function::Square, 0.0, 2.0, black_box(15), QuadratureRule::MidPoint)
                .expect("partitions are nonzero")
                .estimate()
        });
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let mut config = Config::new();
    config.integration.seed = Some(0);

    group.bench_function("recording", |b| {
        let mut explorer = Explorer::new(&config).expect("default config is valid");
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            explorer.frame(&mut surface).expect("frame should render");
            black_box(surface.commands().len())
        });
    });

    group.bench_function("raster", |b| {
        let mut explorer = Explorer::new(&config).expect("default config is valid");
        b.iter(|| explorer.render_raster().expect("frame should render"));
    });

    group.finish();
}

criterion_group!(
    benches,
    integrate_benchmark,
    cached_integrate_benchmark,
    frame_benchmark
);
criterion_main!(benches);
