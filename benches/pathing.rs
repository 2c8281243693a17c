use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazes::cells::Cell;
use mazes::generators;
use mazes::pathing;
use mazes::units::{Height, Width};

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = generators::generate(Width(351), Height(351), Some(7)).unwrap();
        let start_coord = Cell::new(251, 251);
        b.iter(|| pathing::Distances::for_grid(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = generators::generate(Width(351), Height(351), Some(7)).unwrap();
        let start_coord = Cell::new(251, 251);
        let distances = pathing::Distances::for_grid(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_solve_level_maze(c: &mut Criterion) {
    c.bench_function("solve_41_31", |b| {
        let g = generators::generate(Width(41), Height(31), Some(7)).unwrap();
        b.iter(|| pathing::solve(&g, g.start_room(), g.exit_room()))
    });
}

fn bench_solve_large_maze(c: &mut Criterion) {
    c.bench_function("solve_351", |b| {
        let g = generators::generate(Width(351), Height(351), Some(7)).unwrap();
        let start_coord = Cell::new(251, 251);
        b.iter(|| pathing::solve(&g, start_coord, Cell::new(1, 1)))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_solve_level_maze,
    bench_solve_large_maze
);
criterion_main!(benches);
