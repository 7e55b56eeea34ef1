//! Serialization Benchmarks
//!
//! ## Benchmark Groups
//!
//! - `component_*`: one component batch into one cell (codec cost only)
//! - `archetype_*`: a whole archetype, indicator included
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench serialize_archetypes
//! cargo bench --bench serialize_archetypes -- "archetype_tensor"
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use stratalog::archetypes::{Mesh3D, Tensor, Transform3D};
use stratalog::components::{Color, Position3D};
use stratalog::datatypes::{Quaternion, TranslationRotationScale3D, Vec3D};
use stratalog::{AsComponents, Component, MemoryPool};

const BATCH_SIZES: [usize; 3] = [16, 1_024, 65_536];

fn positions(count: usize) -> Vec<Position3D> {
    (0..count)
        .map(|i| {
            let f = i as f32;
            Position3D::new(f, f * 0.5, -f)
        })
        .collect()
}

fn component_benchmarks(c: &mut Criterion) {
    let pool = MemoryPool::unbounded("bench");
    let mut group = c.benchmark_group("component_position3d");
    for size in BATCH_SIZES {
        let batch = positions(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| Position3D::to_data_cell_with(&pool, black_box(batch)))
        });
    }
    group.finish();
}

fn archetype_benchmarks(c: &mut Criterion) {
    let pool = MemoryPool::unbounded("bench");

    let mut group = c.benchmark_group("archetype_mesh3d");
    for size in BATCH_SIZES {
        let vertices = positions(size);
        let colors = vec![Color::from_rgb(200, 100, 50); size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                Mesh3D::new(&vertices)
                    .with_vertex_colors(&colors)
                    .serialize_with(&pool)
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("archetype_tensor");
    for side in [8u64, 256, 1_024] {
        let pixels = vec![0u8; (side * side * 3) as usize];
        group.throughput(Throughput::Bytes(pixels.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(side), |b| {
            b.iter(|| Tensor::from_elements([side, side, 3], &pixels).serialize_with(&pool))
        });
    }
    group.finish();

    let transform = Transform3D::new(
        TranslationRotationScale3D::translation(Vec3D::new(1.0, 2.0, 3.0))
            .with_rotation(Quaternion::IDENTITY),
    );
    c.bench_function("archetype_transform3d", |b| {
        b.iter(|| black_box(&transform).serialize_with(&pool))
    });
}

criterion_group!(
    name = serialization;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = component_benchmarks, archetype_benchmarks
);

criterion_main!(serialization);
