//! Frustum and bounds benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench bounds
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench bounds -- create_optimal

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use frustum_bench::*;
use frustum_bounds::{Frustum, Obb2d};
use glam::IVec3;
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Minimum-area rectangle
// ---------------------------------------------------------------------------

fn bench_create_optimal(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("create_optimal/ring");
        for &n in &[4, 10, 100, 1000] {
            let points = ring_points(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
                b.iter(|| Obb2d::create_optimal(black_box(points)));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("create_optimal/grid");
        for &n in &[100, 1000] {
            let points = grid_points(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
                b.iter(|| Obb2d::create_optimal(black_box(points)));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Frustum extraction
// ---------------------------------------------------------------------------

fn bench_frustum(c: &mut Criterion) {
    let mut group = c.benchmark_group("frustum");

    let camera = strategy_camera();
    let projection = *camera.projection().expect("configured camera");
    group.bench_function("extract", |b| {
        b.iter(|| Frustum::extract(black_box(camera.eye()), black_box(&projection)));
    });

    let planes = *camera.frustum().planes();
    group.bench_function("from_planes", |b| {
        b.iter(|| Frustum::from_planes(black_box(planes)));
    });

    group.bench_function("camera_pan", |b| {
        let mut camera = strategy_camera();
        let mut step = 0;
        b.iter(|| {
            step = (step + 1) % 1024;
            camera.set_observed_position(IVec3::new(step * 8, 0, 4096));
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Culling
// ---------------------------------------------------------------------------

fn bench_culling(c: &mut Criterion) {
    let camera = strategy_camera();
    let projection = *camera.projection().expect("configured camera");

    let mut group = c.benchmark_group("culling/spheres");
    for &n in &[1000, 10000] {
        let spheres = scattered_spheres(n);
        group.bench_with_input(BenchmarkId::new("eye_space", n), &spheres, |b, spheres| {
            b.iter(|| {
                spheres
                    .iter()
                    .filter(|&&c| projection.contains_sphere(camera.eye(), c, 40.0))
                    .count()
            });
        });
        group.bench_with_input(BenchmarkId::new("planes", n), &spheres, |b, spheres| {
            b.iter(|| {
                spheres
                    .iter()
                    .filter(|&&c| camera.frustum().contains_sphere(c, 40.0))
                    .count()
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_create_optimal, bench_frustum, bench_culling);
criterion_main!(benches);
