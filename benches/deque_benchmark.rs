use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use segdeque::{Queue, SegDeque};
use std::collections::VecDeque;

fn bench_push_both_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deque Push Both Ends");
    let size = 100_000u64;

    group.bench_function("std::VecDeque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..size {
                if i & 1 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            black_box(deque);
        })
    });

    group.bench_function("SegDeque", |b| {
        b.iter(|| {
            let mut deque = SegDeque::new();
            for i in 0..size {
                if i & 1 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            black_box(deque);
        })
    });

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deque Random Access");
    let size = 100_000usize;
    let indices: Vec<usize> = (0..size).map(|i| (i * 7919) % size).collect();
    let vec_deque: VecDeque<usize> = (0..size).collect();
    let seg_deque: SegDeque<usize> = (0..size).collect();

    group.bench_function("std::VecDeque", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for &i in &indices {
                sum = sum.wrapping_add(vec_deque[i]);
            }
            black_box(sum)
        })
    });

    group.bench_function("SegDeque", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for &i in &indices {
                sum = sum.wrapping_add(seg_deque[i]);
            }
            black_box(sum)
        })
    });

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deque Iteration");
    let size = 100_000u64;
    let vec_deque: VecDeque<u64> = (0..size).collect();
    let seg_deque: SegDeque<u64> = (0..size).collect();

    group.bench_function("std::VecDeque", |b| {
        b.iter(|| black_box(vec_deque.iter().sum::<u64>()))
    });

    group.bench_function("SegDeque iter", |b| {
        b.iter(|| black_box(seg_deque.iter().sum::<u64>()))
    });

    group.bench_function("SegDeque segments", |b| {
        b.iter(|| {
            black_box(
                seg_deque
                    .segments()
                    .map(|s| s.iter().sum::<u64>())
                    .sum::<u64>(),
            )
        })
    });

    group.finish();
}

fn bench_middle_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deque Middle Insert/Remove");

    for size in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("std::VecDeque", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).collect::<VecDeque<usize>>(),
                |mut deque| {
                    for i in 0..100 {
                        deque.insert(size / 3 + i, i);
                    }
                    for _ in 0..100 {
                        deque.remove(size / 3);
                    }
                    black_box(deque);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("SegDeque", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).collect::<SegDeque<usize>>(),
                |mut deque| {
                    for i in 0..100 {
                        deque.insert(size / 3 + i, i);
                    }
                    for _ in 0..100 {
                        deque.remove(size / 3);
                    }
                    black_box(deque);
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_fifo_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("FIFO Queue Steady State");
    let ops = 100_000u32;

    group.bench_function("Queue<VecDeque>", |b| {
        b.iter(|| {
            let mut queue: Queue<u32, VecDeque<u32>> = Queue::new();
            for i in 0..ops {
                queue.push(i);
                if i % 4 != 0 {
                    black_box(queue.pop());
                }
            }
            black_box(queue.len())
        })
    });

    group.bench_function("Queue<SegDeque>", |b| {
        b.iter(|| {
            let mut queue: Queue<u32> = Queue::new();
            for i in 0..ops {
                queue.push(i);
                if i % 4 != 0 {
                    black_box(queue.pop());
                }
            }
            black_box(queue.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_both_ends,
    bench_random_access,
    bench_iteration,
    bench_middle_insert_remove,
    bench_fifo_queue
);
criterion_main!(benches);
