use growvec::GrowVec;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("amortized_growth", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = GrowVec::new();

                    for i in 0..size {
                        vec.push(black_box(i));
                    }

                    black_box(vec.len())
                });
            },
        );
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("checked_get", size),
            size,
            |b, &size| {
                let mut vec = GrowVec::new();

                // Pre-populate the vector
                for i in 0..size {
                    vec.push(i);
                }

                b.iter(|| {
                    for i in 0..size {
                        black_box(vec.try_get(i));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("full_iteration", size),
            size,
            |b, &size| {
                let mut vec = GrowVec::new();

                // Pre-populate the vector
                for i in 0..size {
                    vec.push(i);
                }

                b.iter(|| {
                    for value in black_box(&vec) {
                        black_box(value);
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_front_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insertion");

    for size in [10, 100].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("shift_heavy", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = GrowVec::new();

                    for i in 0..size {
                        vec.insert(0, black_box(i));
                    }

                    black_box(vec.len())
                });
            },
        );
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("middle_half", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = GrowVec::new();

                    for i in 0..size {
                        vec.push(i);
                    }

                    vec.drain(size / 4..3 * size / 4);

                    black_box(vec.len())
                });
            },
        );
    }
    group.finish();
}

fn bench_stack_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("push_pop_cycle", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let mut vec = GrowVec::with_capacity(size);

                    // Push elements
                    for i in 0..size {
                        vec.push(black_box(i));
                    }

                    // Pop elements
                    for _ in 0..size {
                        black_box(vec.pop());
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_large_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_elements");

    for element_size in [1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*element_size as u64 * 10));
        group.bench_with_input(
            BenchmarkId::new("push_large", element_size),
            element_size,
            |b, &element_size| {
                b.iter(|| {
                    let mut vec = GrowVec::new();
                    let large_data = vec![b'x'; element_size];

                    for _ in 0..10 {
                        vec.push(black_box(large_data.clone()));
                    }

                    black_box(vec.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_iterator_performance,
    bench_front_insertion,
    bench_drain,
    bench_stack_operations,
    bench_large_elements
);
criterion_main!(benches);
