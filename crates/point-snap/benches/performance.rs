//! Performance benchmarks for point-snap
//!
//! Run with: cargo bench --package point-snap

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use point_snap::{GeoPoint, PathCollection, Snapper};
use std::hint::black_box;

/// Generate a wiggly path with the specified number of vertices.
fn generate_path(num_points: usize, base_lat: f64, base_lon: f64) -> Vec<GeoPoint> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = base_lon + t * 0.1 + (t * 30.0).cos() * 0.001;
            GeoPoint::new(lat, lon)
        })
        .collect()
}

/// Generate several paths spread across an area
fn generate_paths(num_paths: usize, points_per_path: usize) -> PathCollection {
    PathCollection::new(
        (0..num_paths)
            .map(|i| {
                let lat_offset = (i % 10) as f64 * 0.1;
                let lon_offset = (i / 10) as f64 * 0.1;
                generate_path(points_per_path, 39.7 + lat_offset, -105.0 + lon_offset)
            })
            .collect(),
    )
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap");
    let snapper = Snapper::default();
    let target = GeoPoint::new(39.75, -104.95);

    for &vertices in &[1_000usize, 10_000, 100_000] {
        let paths = generate_paths(10, vertices / 10);
        let points: Vec<GeoPoint> = paths.vertices().map(|(_, _, v)| v).collect();
        group.throughput(Throughput::Elements(vertices as u64));

        group.bench_with_input(BenchmarkId::new("points", vertices), &points, |b, points| {
            b.iter(|| snapper.snap_to_points(black_box(target), points))
        });
        group.bench_with_input(BenchmarkId::new("vertices", vertices), &paths, |b, paths| {
            b.iter(|| snapper.snap_to_vertices(black_box(target), paths))
        });
        group.bench_with_input(BenchmarkId::new("paths", vertices), &paths, |b, paths| {
            b.iter(|| snapper.snap_to_paths(black_box(target), paths))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_snap);
criterion_main!(benches);
