use volume_bricks_compress::prelude::*;
use volume_bricks_core::prelude::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use utilities::data_sets::{random_volume, sparse_blob_volume};

fn compress_sparse_blobs(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_sparse_blobs");
    for size in VOLUME_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (dimensions, samples) = sparse_blob_volume(Point3i::fill(size), 0.0, 3);
            let volume = DenseVolume::new(dimensions, &samples);
            let config = CompressionConfig::default().with_brick_size(8);
            b.iter(|| compress(&volume, &config).unwrap());
        });
    }
    group.finish();
}

fn plan_random_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_random_volume");
    for size in VOLUME_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (dimensions, samples) = random_volume(Point3i::fill(size), 3);
            let volume = DenseVolume::new(dimensions, &samples);
            let config = CompressionConfig::default().with_brick_size(8);
            b.iter(|| CompressionPlan::new(&volume, &config).unwrap());
        });
    }
    group.finish();
}

const VOLUME_SIZES: [i32; 3] = [16, 32, 64];

criterion_group!(benches, compress_sparse_blobs, plan_random_volume);
criterion_main!(benches);
