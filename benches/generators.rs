use criterion::{criterion_group, criterion_main, Criterion};
use mazeframes::{
    generators,
    grid_dimensions::GridDimensions,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let dimensions = GridDimensions::new(32, 32).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(32);

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(dimensions, &mut rng))
    });
}

fn bench_recursive_division_maze_32(c: &mut Criterion) {
    let dimensions = GridDimensions::new(32, 32).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(32);

    c.bench_function("recursive_division_maze_32", move |b| {
        b.iter(|| generators::recursive_division(dimensions, &mut rng))
    });
}

fn bench_recursive_backtracker_maze_50(c: &mut Criterion) {
    let dimensions = GridDimensions::new(50, 50).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(50);

    c.bench_function("recursive_backtracker_maze_50", move |b| {
        b.iter(|| generators::recursive_backtracker(dimensions, &mut rng))
    });
}

fn bench_recursive_division_maze_50(c: &mut Criterion) {
    let dimensions = GridDimensions::new(50, 50).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(50);

    c.bench_function("recursive_division_maze_50", move |b| {
        b.iter(|| generators::recursive_division(dimensions, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_division_maze_32,
    bench_recursive_backtracker_maze_50,
    bench_recursive_division_maze_50
);
criterion_main!(benches);
