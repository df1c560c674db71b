//! Benchmark for VXM encoding and decoding.
//!
//! Run with: cargo bench --package voxelcore_io --bench codec_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voxelcore_grid::{IVec3, VoxelGrid};
use voxelcore_io::{rle, VxmCodec, VxmConfig};

const SIZE: i32 = 128;

/// Layered terrain with long runs, the common case for generated models.
fn layered() -> VoxelGrid {
    let mut grid = VoxelGrid::new(SIZE, SIZE, SIZE).unwrap();
    grid.fill_box(IVec3::ZERO, IVec3::new(SIZE, 40, SIZE), 1);
    grid.fill_box(IVec3::new(0, 40, 0), IVec3::new(SIZE, 48, SIZE), 2);
    for i in 0..16 {
        let c = i * 8;
        grid.fill_box(IVec3::new(c, 48, c), IVec3::new(c + 4, 48 + i * 4, c + 4), 3);
    }
    grid
}

fn benchmark_rle(c: &mut Criterion) {
    let grid = layered();
    let mut group = c.benchmark_group("rle_128");
    group.throughput(Throughput::Bytes(grid.voxel_count() as u64));

    group.bench_function("encode", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            out.clear();
            black_box(rle::encode(black_box(grid.voxels()), &mut out))
        });
    });

    let mut stream = Vec::new();
    rle::encode(grid.voxels(), &mut stream);
    group.bench_function("decode", |b| {
        b.iter(|| {
            let voxels = rle::decode(&mut stream.as_slice(), grid.voxel_count()).unwrap();
            black_box(voxels);
        });
    });

    group.finish();
}

fn benchmark_container(c: &mut Criterion) {
    let grid = layered();
    let mut group = c.benchmark_group("vxm_128");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(grid.voxel_count() as u64));

    for level in [1, 6, 9] {
        let codec = VxmCodec::with_config(VxmConfig {
            compression_level: level,
        });
        group.bench_function(format!("write_level_{level}"), |b| {
            let mut out = Vec::new();
            b.iter(|| {
                out.clear();
                codec
                    .write_to(black_box(&grid), None, None, &mut out)
                    .unwrap();
            });
        });
    }

    let codec = VxmCodec::new();
    let mut bytes = Vec::new();
    codec
        .write_to(&grid, None, None, &mut bytes)
        .unwrap();
    group.bench_function("read", |b| {
        b.iter(|| black_box(codec.read_from(bytes.as_slice()).unwrap()));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchmark_rle,
              benchmark_container
}

criterion_main!(benches);
