//! Performance benchmarks for trek-lib
//!
//! Run with: cargo bench --package trek-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use trek_lib::{
    CONSTELLATION_TOLERANCE, Galaxy, LatLng, Path, decode_polyline, encode_polyline, project,
    simplify,
};

/// Generate a realistic GPS track with the specified number of points.
fn generate_track(num_points: usize, base_lat: f64, base_lon: f64) -> Path {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            LatLng::new(
                base_lat + t * 0.1 + (t * 50.0).sin() * 0.001,
                base_lon + t * 0.1 + (t * 30.0).cos() * 0.001,
            )
        })
        .collect()
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");

    for &size in &[1_000usize, 10_000, 50_000] {
        let track = generate_track(size, 51.5, -0.1);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &track, |b, track| {
            b.iter(|| simplify(track, CONSTELLATION_TOLERANCE));
        });
    }

    group.finish();
}

fn bench_polyline(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline");

    let track = generate_track(10_000, 51.5, -0.1);
    let encoded = encode_polyline(&track);
    group.throughput(Throughput::Elements(track.len() as u64));

    group.bench_function("encode_10k", |b| {
        b.iter(|| encode_polyline(&track));
    });
    group.bench_function("decode_10k", |b| {
        b.iter(|| decode_polyline(&encoded));
    });

    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");

    let track = generate_track(50_000, 51.5, -0.1);
    group.bench_function("constellation_50k", |b| {
        b.iter(|| project(&track, 250.0, 250.0, CONSTELLATION_TOLERANCE));
    });

    group.finish();
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    group.sample_size(20);

    // Past a handful of items the default galaxy is full, so this mostly measures fallbacks
    group.bench_function("galaxy_50_items", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut galaxy = Galaxy::default();
            for _ in 0..50 {
                galaxy.place_next(&mut rng);
            }
            galaxy
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_simplify,
    bench_polyline,
    bench_project,
    bench_placement,
);

criterion_main!(benches);
