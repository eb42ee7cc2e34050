//! Criterion micro-benchmarks for append, copy, resize, and mixed workloads,
//! compared against `Vec` and `SmallVec`.

use std::hint::black_box;

use contig_array::{DynArray, ScaledGrowth};
use contig_bench::{apply_to_array, apply_to_model, op_script};
use criterion::{criterion_group, criterion_main, Criterion};
use smallvec::SmallVec;

const APPEND_COUNT: u32 = 10_000;

fn bench_push_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_10k");

    group.bench_function("dyn_array_doubling", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for i in 0..APPEND_COUNT {
                array.push(black_box(i)).unwrap();
            }
            black_box(array.len());
        });
    });

    group.bench_function("dyn_array_scaled", |b| {
        b.iter(|| {
            let mut array = DynArray::with_growth(ScaledGrowth::default());
            for i in 0..APPEND_COUNT {
                array.push(black_box(i)).unwrap();
            }
            black_box(array.len());
        });
    });

    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..APPEND_COUNT {
                v.push(black_box(i));
            }
            black_box(v.len());
        });
    });

    group.bench_function("smallvec_16", |b| {
        b.iter(|| {
            let mut v: SmallVec<[u32; 16]> = SmallVec::new();
            for i in 0..APPEND_COUNT {
                v.push(black_box(i));
            }
            black_box(v.len());
        });
    });

    group.finish();
}

fn bench_clone_10k(c: &mut Criterion) {
    let source: Vec<u64> = (0..u64::from(APPEND_COUNT)).collect();
    let array = DynArray::from_slice(&source).unwrap();

    c.bench_function("dyn_array_try_clone_10k", |b| {
        b.iter(|| {
            let copy = array.try_clone().unwrap();
            black_box(copy.len());
        });
    });

    c.bench_function("dyn_array_assign_from_10k", |b| {
        let mut target = DynArray::with_capacity(source.len()).unwrap();
        b.iter(|| {
            target.assign_from(&array).unwrap();
            black_box(target.len());
        });
    });
}

fn bench_resize_cycle(c: &mut Criterion) {
    c.bench_function("dyn_array_resize_cycle", |b| {
        let mut array = DynArray::new();
        b.iter(|| {
            array.resize(4_096, 7u32).unwrap();
            array.resize(16, 0).unwrap();
            black_box(array.capacity());
        });
    });
}

fn bench_script_replay(c: &mut Criterion) {
    let script = op_script(0x5EED, 4_096);

    let mut group = c.benchmark_group("script_replay_4k");

    group.bench_function("dyn_array", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for &op in &script {
                apply_to_array(&mut array, op).unwrap();
            }
            black_box(array.len());
        });
    });

    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut model = Vec::new();
            for &op in &script {
                apply_to_model(&mut model, op);
            }
            black_box(model.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_10k,
    bench_clone_10k,
    bench_resize_cycle,
    bench_script_replay
);
criterion_main!(benches);
