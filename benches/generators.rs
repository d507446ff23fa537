use criterion::{criterion_group, criterion_main, Criterion};
use maze_search::{maze::Maze, units::GridLength};

fn bench_recursive_backtracker_32(c: &mut Criterion) {
    let mut maze = Maze::with_seed(GridLength(32), 7).unwrap();
    c.bench_function("recursive_backtracker_32", move |b| {
        b.iter(|| maze.regenerate())
    });
}

fn bench_recursive_backtracker_128(c: &mut Criterion) {
    let mut maze = Maze::with_seed(GridLength(128), 7).unwrap();
    c.bench_function("recursive_backtracker_128", move |b| {
        b.iter(|| maze.regenerate())
    });
}

fn bench_clear_and_obstacles_128(c: &mut Criterion) {
    let mut maze = Maze::with_seed(GridLength(128), 7).unwrap();
    c.bench_function("clear_and_obstacles_128", move |b| {
        b.iter(|| {
            maze.clear();
            for node in (0..maze.size()).step_by(7) {
                maze.set_node_as_obstacle(node).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_32,
    bench_recursive_backtracker_128,
    bench_clear_and_obstacles_128
);
criterion_main!(benches);
