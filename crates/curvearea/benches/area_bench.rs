//! Criterion microbenches for the open-curve fallback path.
//!
//! - dedup + Graham scan on noisy rings (100–2000 points).
//! - nearest-neighbour ordering on the same clouds.
//! - full request over a ring of open arcs (joined) and scattered lines (hull).
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use curvearea::api::{
    dedup_points, graham_scan, order_nearest_neighbor, Arc, AreaCfg, AreaRequest, Curve, Line, Pt2,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

fn noisy_ring(n: usize, seed: u64) -> Vec<Pt2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            let r = 1.0 + rng.gen_range(-0.05..0.05);
            Pt2::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("points");
    for n in [100usize, 500, 2000] {
        let pts = noisy_ring(n, 42);
        group.bench_with_input(BenchmarkId::new("dedup_hull", n), &pts, |b, pts| {
            b.iter(|| {
                let reduced = dedup_points(pts, 1e-3);
                let _ = graham_scan(&reduced);
            })
        });
        group.bench_with_input(BenchmarkId::new("nearest", n), &pts, |b, pts| {
            b.iter(|| {
                let _ = order_nearest_neighbor(pts, 1e-3);
            })
        });
    }
    group.finish();
}

fn bench_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");
    let cfg = AreaCfg::default();
    let arcs: Vec<Curve> = (0..12)
        .map(|k| {
            let a0 = TAU * k as f64 / 12.0;
            Curve::Arc(Arc {
                center: Pt2::zeros(),
                radius: 5.0,
                start_angle: a0,
                end_angle: a0 + TAU / 12.0,
            })
        })
        .collect();
    group.bench_function("joined_arcs_12", |b| {
        b.iter(|| {
            let _ = AreaRequest::new(cfg).run(&arcs);
        })
    });
    let mut rng = StdRng::seed_from_u64(7);
    let lines: Vec<Curve> = (0..200)
        .map(|_| {
            let p = Pt2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let d = Pt2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            Curve::Line(Line {
                start: p,
                end: p + d,
            })
        })
        .collect();
    group.bench_function("scattered_lines_200", |b| {
        b.iter(|| {
            let _ = AreaRequest::new(cfg).run(&lines);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_points, bench_request);
criterion_main!(benches);
