//! # Tick Benchmark
//!
//! A full frame at console scale: ten objects, D-pad held, crank turning,
//! every renderer drawn into a recording surface.
//!
//! Run with: `cargo bench --package crankset_core --bench tick_benchmark`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crankset_core::{Buttons, DrawList, InputSnapshot, World, WorldConfig};

fn full_world() -> World {
    let mut world = World::new(WorldConfig::default()).unwrap_or_else(|e| panic!("{e}"));
    while world.spawn_random().is_ok() {}
    world
}

/// Benchmark: one tick with every pool in use.
fn bench_full_tick(c: &mut Criterion) {
    let mut world = full_world();
    let mut surface = DrawList::with_capacity(16);
    let mut angle = 0.0f32;

    c.bench_function("tick_full_world", |b| {
        b.iter(|| {
            surface.clear();
            angle = (angle + 7.0) % 360.0;
            let input = InputSnapshot::held(Buttons::RIGHT | Buttons::DOWN, angle);
            black_box(world.tick(&input, &mut surface))
        });
    });
}

/// Benchmark: spawn/despawn churn through the tick's input path.
fn bench_spawn_despawn_cycle(c: &mut Criterion) {
    let mut world = full_world();

    c.bench_function("despawn_then_spawn_full_world", |b| {
        b.iter(|| {
            black_box(world.despawn_first_active());
            black_box(world.spawn_random().ok())
        });
    });
}

criterion_group!(benches, bench_full_tick, bench_spawn_despawn_cycle);
criterion_main!(benches);
