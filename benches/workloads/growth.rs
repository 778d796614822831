use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use segdeque::SegDeque;

/// Payload large enough that copying it on growth would dominate.
#[derive(Clone, Copy)]
struct Payload([u64; 32]);

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");

    for &n in &[1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("large_payload", n), &n, |b, &n| {
            b.iter(|| {
                let mut d = SegDeque::<Payload, 16>::new();
                for i in 0..n {
                    d.push_back(Payload([i as u64; 32]));
                }
                black_box(d.directory_len());
            })
        });
        group.bench_with_input(BenchmarkId::new("reserved", n), &n, |b, &n| {
            b.iter(|| {
                let mut d = SegDeque::<Payload, 16>::with_capacity(n);
                for i in 0..n {
                    d.push_back(Payload([i as u64; 32]));
                }
                black_box(d.directory_len());
            })
        });
    }

    group.finish();
}
