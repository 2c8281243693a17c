use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use mazes::{
    generators,
    progression::next_level_size,
    units::{Height, Width},
};

fn bench_recursive_backtracker_maze_31_21(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(31);
    c.bench_function("recursive_backtracker_maze_31_21", move |b| {
        b.iter(|| generators::recursive_backtracker(Width(31), Height(21), &mut rng))
    });
}

fn bench_recursive_backtracker_maze_41_31(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(41);
    c.bench_function("recursive_backtracker_maze_41_31", move |b| {
        b.iter(|| generators::recursive_backtracker(Width(41), Height(31), &mut rng))
    });
}

fn bench_recursive_backtracker_maze_351(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(351);
    c.bench_function("recursive_backtracker_maze_351", move |b| {
        b.iter(|| generators::recursive_backtracker(Width(351), Height(351), &mut rng))
    });
}

fn bench_next_level_size(c: &mut Criterion) {
    c.bench_function("next_level_size", |b| {
        b.iter(|| (0..100).map(|level| next_level_size(level, Width(31), Height(21))).last())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_31_21,
    bench_recursive_backtracker_maze_41_31,
    bench_recursive_backtracker_maze_351,
    bench_next_level_size
);
criterion_main!(benches);
