//! Benchmarks for native class descriptor access.
//!
//! Covers the hot paths of a runtime bridge:
//! - Allocating a descriptor with a vtable
//! - Wrapping an existing descriptor
//! - Bitfield flag reads and writes
//! - Scalar field round trips

extern crate reforge;

use criterion::{criterion_group, criterion_main, Criterion};
use reforge::native::{class_handler_for, MetadataVersion};
use std::hint::black_box;

/// Benchmark allocating a zeroed 29.0 descriptor with 32 vtable slots.
fn bench_create_new(c: &mut Criterion) {
    let handler = class_handler_for(MetadataVersion::new(29, 0)).unwrap();

    c.bench_function("class_create_new_32_slots", |b| {
        b.iter(|| {
            let class = handler.create_new(black_box(32)).unwrap();
            black_box(class)
        });
    });
}

/// Benchmark wrapping an existing descriptor, which reads the vtable count first.
fn bench_wrap(c: &mut Criterion) {
    let handler = class_handler_for(MetadataVersion::new(24, 1)).unwrap();
    let owner = handler.create_new(16).unwrap();
    let ptr = owner.class_pointer();

    c.bench_function("class_wrap", |b| {
        b.iter(|| {
            let view = unsafe { handler.wrap(black_box(ptr)) }.unwrap();
            black_box(view.vtable_count().unwrap())
        });
    });
}

/// Benchmark toggling a flag that shares its storage unit with other flags.
fn bench_flags(c: &mut Criterion) {
    let handler = class_handler_for(MetadataVersion::new(27, 0)).unwrap();
    let mut class = handler.create_new(0).unwrap();

    c.bench_function("class_flag_toggle", |b| {
        b.iter(|| {
            let current = class.value_type().unwrap();
            class.set_value_type(black_box(!current)).unwrap();
        });
    });
}

/// Benchmark a scalar write followed by a read.
fn bench_scalars(c: &mut Criterion) {
    let handler = class_handler_for(MetadataVersion::new(24, 0)).unwrap();
    let mut class = handler.create_new(0).unwrap();

    c.bench_function("class_instance_size_roundtrip", |b| {
        b.iter(|| {
            class.set_instance_size(black_box(0x40)).unwrap();
            black_box(class.instance_size().unwrap())
        });
    });
}

criterion_group!(benches, bench_create_new, bench_wrap, bench_flags, bench_scalars);
criterion_main!(benches);
