//! Deep clone benchmarks.
//!
//! Measures clone throughput across the graph shapes that stress the
//! identity map differently: wide, deep, shared and cyclic.
//!
//! Run with: `cargo bench -p value clone`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use value::{deep_clone, Value};

/// Flat mapping with `entries` numeric fields
fn wide_map(entries: usize) -> Value {
    let map = Value::new_map();
    for i in 0..entries {
        map.insert(format!("field{}", i), Value::number(i as f64))
            .unwrap();
    }
    map
}

/// Singleton sequences nested `depth` levels
fn deep_seq(depth: usize) -> Value {
    let mut current = Value::number(0.0);
    for _ in 0..depth {
        current = Value::seq_from([current]);
    }
    current
}

/// Sequence whose every slot aliases one shared mapping
fn shared_fanout(width: usize) -> Value {
    let shared = wide_map(16);
    let seq = Value::new_seq();
    for _ in 0..width {
        seq.push(shared.clone()).unwrap();
    }
    seq
}

/// Ring of mappings, each pointing at the next, the last back to the first
fn cyclic_ring(len: usize) -> Value {
    let first = Value::new_map();
    let mut current = first.clone();
    for i in 1..len {
        let next = Value::new_map();
        next.insert("id", Value::number(i as f64)).unwrap();
        current.insert("next", next.clone()).unwrap();
        current = next;
    }
    current.insert("next", first.clone()).unwrap();
    first
}

fn clone_wide_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_wide");

    for entries in [64, 512, 4096].iter() {
        let source = wide_map(*entries);
        group.bench_with_input(BenchmarkId::new("entries", entries), &source, |b, source| {
            b.iter(|| black_box(deep_clone(source)));
        });
    }

    group.finish();
}

fn clone_deep_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_deep");

    for depth in [16, 128, 512].iter() {
        let source = deep_seq(*depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &source, |b, source| {
            b.iter(|| black_box(deep_clone(source)));
        });
    }

    group.finish();
}

fn clone_shared_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_shared");

    // The identity map visits the shared mapping once per clone, so cost
    // must stay linear in width rather than width * mapping size.
    for width in [8, 64, 512].iter() {
        let source = shared_fanout(*width);
        group.bench_with_input(BenchmarkId::new("width", width), &source, |b, source| {
            b.iter(|| black_box(deep_clone(source)));
        });
    }

    group.finish();
}

fn clone_cyclic_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_cyclic");

    group.bench_function("self_cycle", |b| {
        let source = Value::new_map();
        source.insert("me", source.clone()).unwrap();
        b.iter(|| {
            let copy = deep_clone(&source);
            // Break the copied cycle so iterations do not accumulate
            // leaked reference loops.
            copy.insert("me", Value::null()).unwrap();
            black_box(copy)
        });
    });

    group.bench_function("ring_100", |b| {
        let source = cyclic_ring(100);
        b.iter(|| {
            let copy = deep_clone(&source);
            copy.insert("next", Value::null()).unwrap();
            black_box(copy)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    clone_wide_benchmark,
    clone_deep_benchmark,
    clone_shared_benchmark,
    clone_cyclic_benchmark,
);

criterion_main!(benches);
