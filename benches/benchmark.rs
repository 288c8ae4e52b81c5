// Cycle checker benchmarks over chains, fan-outs, rings and random DAGs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dagcheck_core::{CycleChecker, DanglingPolicy, Graph, GraphLimits};
use rand::prelude::*;

fn node_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("node-{}", i)).collect()
}

fn chain(n: usize) -> Graph {
    let ids = node_ids(n);
    let edges: Vec<(String, String)> = ids.windows(2).map(|w| (w[0].clone(), w[1].clone())).collect();
    Graph::from_ids(ids, edges)
}

fn ring(n: usize) -> Graph {
    let graph = chain(n);
    let (first, last) = (graph.nodes[0].clone(), graph.nodes[n - 1].clone());
    graph.with_edge(last, first)
}

fn fan_out(n: usize) -> Graph {
    let ids = node_ids(n);
    let edges: Vec<(String, String)> = ids[1..].iter().map(|id| (ids[0].clone(), id.clone())).collect();
    Graph::from_ids(ids, edges)
}

/// Random DAG: edges only go from lower to higher index
fn random_dag(n: usize, edges_per_node: usize) -> Graph {
    let mut rng = rand::rng();
    let ids = node_ids(n);
    let mut edges = Vec::with_capacity(n * edges_per_node);
    for i in 0..n - 1 {
        for _ in 0..edges_per_node {
            let j = rng.random_range(i + 1..n);
            edges.push((ids[i].clone(), ids[j].clone()));
        }
    }
    Graph::from_ids(ids, edges)
}

fn benchmark_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let checker = CycleChecker::default().with_limits(GraphLimits::unbounded());

    for size in [100, 1000, 10000].iter() {
        let shapes = [
            ("chain", chain(*size)),
            ("ring", ring(*size)),
            ("fan_out", fan_out(*size)),
            ("random_dag", random_dag(*size, 4)),
        ];
        for (name, graph) in shapes.iter() {
            group.bench_with_input(BenchmarkId::new(*name, size), graph, |b, graph| {
                b.iter(|| black_box(checker.evaluate(black_box(graph)).unwrap()));
            });
        }
    }

    group.finish();
}

fn benchmark_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policies");
    let graph = random_dag(10000, 4);

    for policy in [DanglingPolicy::Reject, DanglingPolicy::Implicit, DanglingPolicy::Compatible] {
        let checker = CycleChecker::new(policy, GraphLimits::unbounded());
        group.bench_function(policy.as_str(), |b| {
            b.iter(|| black_box(checker.evaluate(black_box(&graph)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_shapes, benchmark_policies);
criterion_main!(benches);
