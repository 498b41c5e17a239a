use common::Vec2;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid::{CellSpacePartition, GridConfig, Ray};
use rand::prelude::*;

fn random_position(rng: &mut ThreadRng) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0))
}

fn populated(rng: &mut ThreadRng, count: u32) -> (CellSpacePartition<u32>, Vec<Vec2>) {
    let mut partition = CellSpacePartition::new(GridConfig::with_cells(1000.0, 1000.0, 32, 32))
        .expect("valid grid");
    let mut positions = Vec::with_capacity(count as usize);
    for value in 0..count {
        let position = random_position(rng);
        partition.insert(value, position).expect("position inside grid");
        positions.push(position);
    }
    (partition, positions)
}

fn insert_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut partition =
        CellSpacePartition::new(GridConfig::with_cells(1000.0, 1000.0, 32, 32)).expect("valid grid");
    let mut value = 0u32;

    c.bench_function("partition_insert", |b| {
        b.iter(|| {
            value = value.wrapping_add(1);
            let _ = partition.insert(black_box(value), random_position(&mut rng));
        })
    });
}

fn update_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut partition, mut positions) = populated(&mut rng, 1000);

    c.bench_function("partition_update", |b| {
        b.iter(|| {
            let value = rng.gen_range(0..positions.len());
            let new_position = random_position(&mut rng);
            let _ = partition.update(black_box(value as u32), positions[value], new_position);
            positions[value] = new_position;
        })
    });
}

fn query_radius_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (partition, _) = populated(&mut rng, 10_000);
    let mut candidates = Vec::new();

    c.bench_function("partition_query_radius", |b| {
        b.iter(|| {
            candidates.clear();
            partition.query_radius_into(random_position(&mut rng), black_box(40.0), &mut candidates);
        })
    });
}

fn ray_traversal_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let config = GridConfig::with_cells(1000.0, 1000.0, 32, 32);

    c.bench_function("ray_traversal", |b| {
        b.iter(|| {
            let direction = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let ray = Ray::new(random_position(&mut rng), direction, config);
            black_box(ray.iter().count())
        })
    });
}

criterion_group!(
    benches,
    insert_benchmark,
    update_benchmark,
    query_radius_benchmark,
    ray_traversal_benchmark
);
criterion_main!(benches);
