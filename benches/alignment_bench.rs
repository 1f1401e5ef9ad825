use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use molblast::align::{align, AlignConfig};
use molblast::sequence::{pack_symbol, Symbol};
use std::hint::black_box;

fn generate_sequence(length: usize, seed: u8) -> Vec<Symbol> {
    let mut symbols = Vec::with_capacity(length);
    let elements = [6u8, 7, 8, 16];
    for i in 0..length {
        let element = elements[(i + seed as usize) % elements.len()];
        let environment = ((i + seed as usize) % 7) as u8;
        symbols.push(pack_symbol(element, environment));
    }
    symbols
}

fn generate_noise(length: usize, seed: u8) -> Vec<Symbol> {
    let mut symbols = Vec::with_capacity(length);
    let elements = [1u8, 15, 17, 35];
    for i in 0..length {
        let element = elements[(i + seed as usize) % elements.len()];
        let environment = ((i + seed as usize) % 5) as u8;
        symbols.push(pack_symbol(element, environment));
    }
    symbols
}

fn bench_pairwise_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/pairwise");
    let config = AlignConfig::default();

    for length in [16, 64, 256].iter() {
        let query = generate_sequence(*length, 1);
        let subject = generate_sequence(*length, 2);

        group.bench_with_input(
            BenchmarkId::from_parameter(length),
            length,
            |b, _| {
                b.iter(|| {
                    align(black_box(&query), black_box(&subject), black_box(&config))
                });
            },
        );
    }

    group.finish();
}

fn bench_self_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/self");
    let config = AlignConfig::default();

    for length in [64, 256, 1024].iter() {
        let query = generate_sequence(*length, 1);

        group.bench_with_input(
            BenchmarkId::from_parameter(length),
            length,
            |b, _| {
                b.iter(|| {
                    align(black_box(&query), black_box(&query), black_box(&config))
                });
            },
        );
    }

    group.finish();
}

fn bench_multi_region_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/multi_region");
    group.sample_size(20); // Reduce sample size for repeated extraction
    let config = AlignConfig::default();
    let query = generate_sequence(32, 1);

    for blocks in [2usize, 4, 8].iter() {
        let mut subject = Vec::new();
        for block in 0..*blocks {
            subject.extend_from_slice(&query);
            subject.extend(generate_noise(32, block as u8));
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(blocks),
            blocks,
            |b, _| {
                b.iter(|| {
                    align(black_box(&query), black_box(&subject), black_box(&config))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_pairwise_alignment,
    bench_self_alignment,
    bench_multi_region_alignment
);
criterion_main!(benches);
