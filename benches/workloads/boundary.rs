use criterion::{black_box, Criterion, Throughput};
use segdeque::SegDeque;

const OPS: usize = 100_000;

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("push_back", |b| {
        b.iter(|| {
            let mut d = SegDeque::<u64>::new();
            for i in 0..OPS as u64 {
                d.push_back(black_box(i));
            }
            black_box(d);
        })
    });

    group.bench_function("push_front", |b| {
        b.iter(|| {
            let mut d = SegDeque::<u64>::new();
            for i in 0..OPS as u64 {
                d.push_front(black_box(i));
            }
            black_box(d);
        })
    });

    group.bench_function("alternating", |b| {
        b.iter(|| {
            let mut d = SegDeque::<u64>::new();
            for i in 0..OPS as u64 {
                if i & 1 == 0 {
                    d.push_back(black_box(i));
                } else {
                    d.push_front(black_box(i));
                }
            }
            black_box(d);
        })
    });

    // Steady-state queue: the window drifts towards the back.
    group.bench_function("fifo_churn", |b| {
        let mut d = SegDeque::<u64>::with_capacity(1024);
        for i in 0..1024 {
            d.push_back(i);
        }
        b.iter(|| {
            for i in 0..OPS as u64 {
                d.push_back(black_box(i));
                black_box(d.pop_front());
            }
        })
    });

    group.finish();
}
