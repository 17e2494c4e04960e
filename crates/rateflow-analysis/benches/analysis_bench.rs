//! Criterion benchmarks for rateflow-analysis's FFT wrapper
//!
//! Run with: cargo bench -p rateflow-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rateflow_analysis::{Fft, Window};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 48000.0;

fn generate_sine(size: usize, frequency: f32) -> Vec<f32> {
    (0..size).map(|i| (2.0 * PI * frequency * i as f32 / SAMPLE_RATE).sin()).collect()
}

fn bench_fft_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Forward");

    for &size in &[256, 512, 1024, 2048, 4096, 8192] {
        let fft = Fft::new(size);
        let input = generate_sine(size, 440.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(fft.forward(black_box(&input))))
        });
    }

    group.finish();
}

fn bench_fft_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Roundtrip");

    for &size in &[256, 512, 1024, 2048, 4096] {
        let fft = Fft::new(size);
        let input = generate_sine(size, 440.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let spectrum = fft.forward(black_box(&input));
                black_box(fft.inverse(&spectrum))
            })
        });
    }

    group.finish();
}

fn bench_window_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Window");

    let windows = [
        ("Rectangular", Window::Rectangular),
        ("Hann", Window::Hann),
        ("Hamming", Window::Hamming),
        ("Blackman", Window::Blackman),
        ("BlackmanHarris", Window::BlackmanHarris),
    ];
    let buffer = generate_sine(2048, 440.0);

    for (name, window) in &windows {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let mut buf = buffer.clone();
                window.apply(black_box(&mut buf));
                black_box(buf)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fft_forward, bench_fft_roundtrip, bench_window_functions);
criterion_main!(benches);
