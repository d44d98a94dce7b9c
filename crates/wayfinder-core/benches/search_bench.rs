//! # Search Benchmarks
//!
//! Performance benchmarks for wayfinder-core search strategies.
//!
//! Run with: `cargo bench -p wayfinder-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wayfinder_core::{AdjacencyGraph, Budget, Search, Strategy, search};

/// Create an undirected `size x size` grid with unit costs.
fn create_grid_graph(size: u32) -> AdjacencyGraph<(u32, u32)> {
    let mut graph = AdjacencyGraph::new();

    for x in 0..size {
        for y in 0..size {
            graph.add_state((x, y));
            if x + 1 < size {
                graph.add_undirected_edge((x, y), (x + 1, y), 1.0);
            }
            if y + 1 < size {
                graph.add_undirected_edge((x, y), (x, y + 1), 1.0);
            }
        }
    }

    graph
}

/// Create a weighted ring with chords, so that the cheapest path is not the
/// one with the fewest edges.
fn create_chord_graph(size: u32) -> AdjacencyGraph<u32> {
    let mut graph = AdjacencyGraph::new();

    for i in 0..size {
        graph.add_edge(i, (i + 1) % size, 1.0);
        graph.add_edge(i, (i * 7 + 3) % size, f64::from(i % 13 + 2));
    }

    graph
}

fn manhattan(goal: (u32, u32)) -> impl Fn(&(u32, u32)) -> f64 {
    move |&(x, y)| f64::from(x.abs_diff(goal.0) + y.abs_diff(goal.1))
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_uninformed(c: &mut Criterion) {
    let mut group = c.benchmark_group("uninformed");

    for size in [10u32, 30, 60].iter() {
        let graph = create_grid_graph(*size);
        let goal = (size - 1, size - 1);

        for strategy in [Strategy::Bfs, Strategy::Dfs, Strategy::Bidirectional] {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                &goal,
                |b, goal| {
                    b.iter(|| black_box(search(&graph, &(0, 0), goal, strategy, None, None)));
                },
            );
        }
    }

    group.finish();
}

fn bench_iddfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("iddfs");

    for size in [4u32, 6, 8].iter() {
        let graph = create_grid_graph(*size);
        let goal = (size - 1, size - 1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &goal, |b, goal| {
            b.iter(|| black_box(search(&graph, &(0, 0), goal, Strategy::iddfs(), None, None)));
        });
    }

    group.finish();
}

fn bench_cost_aware(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_aware");

    for size in [100u32, 1000, 10000].iter() {
        let graph = create_chord_graph(*size);
        let goal = size / 2;

        group.bench_with_input(BenchmarkId::new("ucs", size), &goal, |b, goal| {
            b.iter(|| black_box(search(&graph, &0, goal, Strategy::Ucs, None, None)));
        });
    }

    group.finish();
}

fn bench_informed(c: &mut Criterion) {
    let mut group = c.benchmark_group("informed");

    for size in [10u32, 30, 60].iter() {
        let graph = create_grid_graph(*size);
        let goal = (size - 1, size - 1);
        let heuristic = manhattan(goal);

        for strategy in [Strategy::Greedy, Strategy::AStar, Strategy::Ucs] {
            let request = Search::new(&graph)
                .strategy(strategy)
                .heuristic(&heuristic)
                .budget(Budget::expansions(1_000_000));

            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                &goal,
                |b, goal| {
                    b.iter(|| black_box(request.run(&(0, 0), goal)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_uninformed,
    bench_iddfs,
    bench_cost_aware,
    bench_informed
);
criterion_main!(benches);
