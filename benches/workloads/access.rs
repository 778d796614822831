use criterion::{black_box, Criterion, Throughput};
use segdeque::SegDeque;

use super::XorShift64;

const LEN: usize = 1 << 16;
const LOOKUPS: usize = 10_000;

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");

    let mut d = SegDeque::<u64>::new();
    for i in 0..LEN as u64 {
        if i & 1 == 0 {
            d.push_back(i);
        } else {
            d.push_front(i);
        }
    }

    group.throughput(Throughput::Elements(LOOKUPS as u64));
    group.bench_function("random_index", |b| {
        let mut rng = XorShift64::new(0xdead_beef);
        b.iter(|| {
            let mut sum = 0u64;
            for _ in 0..LOOKUPS {
                sum = sum.wrapping_add(d[rng.below(LEN)]);
            }
            black_box(sum);
        })
    });

    group.throughput(Throughput::Elements(LEN as u64));
    group.bench_function("iter_sum", |b| {
        b.iter(|| black_box(d.iter().fold(0u64, |acc, x| acc.wrapping_add(*x))))
    });
    group.bench_function("blocks_sum", |b| {
        b.iter(|| {
            black_box(
                d.blocks()
                    .map(|block| block.iter().fold(0u64, |acc, x| acc.wrapping_add(*x)))
                    .fold(0u64, u64::wrapping_add),
            )
        })
    });

    group.finish();
}
