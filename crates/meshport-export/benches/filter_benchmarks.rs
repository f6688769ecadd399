//! Benchmarks for the texture derivation filters
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use meshport_assets::PixelBuffer;
use meshport_export::filters::{box_blur, derive_height, premultiply};

/// Helper to build a checkered buffer so the filters see varied input
fn checker_buffer(size: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let v = if (x + y) % 2 == 0 { 64 } else { 192 };
            buffer.set_pixel(x, y, [v, v, 255, 255]);
        }
    }
    buffer
}

/// Benchmark height derivation across texture sizes
fn bench_derive_height(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_height");

    for size in [64u32, 256, 512] {
        let buffer = checker_buffer(size);

        group.throughput(Throughput::Bytes(u64::from(size) * u64::from(size) * 4));
        group.bench_with_input(BenchmarkId::from_parameter(size), &buffer, |b, buffer| {
            b.iter(|| derive_height(black_box(buffer), 0.5, 0.25))
        });
    }

    group.finish();
}

/// Benchmark box blur across radii
fn bench_box_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_blur");

    let buffer = checker_buffer(256);
    group.throughput(Throughput::Bytes(256 * 256 * 4));

    for radius in [1u32, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| box_blur(black_box(&buffer), radius))
        });
    }

    group.finish();
}

/// Benchmark mask premultiplication
fn bench_premultiply(c: &mut Criterion) {
    let color = checker_buffer(256);
    let mask = checker_buffer(256);

    c.bench_function("premultiply_256", |b| {
        b.iter(|| premultiply(black_box(&color), black_box(&mask)))
    });
}

criterion_group!(benches, bench_derive_height, bench_box_blur, bench_premultiply);
criterion_main!(benches);
