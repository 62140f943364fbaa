use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::sudoku::graph::ConstraintGraph;
use sudoku_solver::sudoku::grid::{EXAMPLE_EASY, EXAMPLE_HARD, Grid};
use sudoku_solver::sudoku::propagation::Propagator;
use sudoku_solver::sudoku::solver::Solver;

const BLANK: &str = "000000000000000000000000000000000000000000000000000000000000000000000000000000000";

fn solve(input: &str) {
    let mut solver = Solver::from_line(black_box(input)).unwrap();
    black_box(solver.solve()).unwrap();
}

fn bench_graph_construction(c: &mut Criterion) {
    c.bench_function("constraint graph construction", |b| {
        b.iter(|| black_box(ConstraintGraph::new()));
    });
}

fn bench_propagation(c: &mut Criterion) {
    let graph = ConstraintGraph::new();
    c.bench_function("propagation fixed point (easy)", |b| {
        b.iter(|| {
            let mut grid: Grid = black_box(EXAMPLE_EASY).parse().unwrap();
            black_box(Propagator::new(&graph).propagate(&mut grid));
        });
    });
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.bench_function("easy", |b| b.iter(|| solve(EXAMPLE_EASY)));
    group.bench_function("hard", |b| b.iter(|| solve(EXAMPLE_HARD)));
    group.bench_function("blank", |b| b.iter(|| solve(BLANK)));
    group.finish();
}

criterion_group!(
    benches,
    bench_graph_construction,
    bench_propagation,
    bench_solve
);
criterion_main!(benches);
