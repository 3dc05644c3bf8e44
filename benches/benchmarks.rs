//! Criterion benchmarks for relgraph.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use relgraph::graph::traversal::{connected_edges, outgoing_edges};
use relgraph::{
    common_parent, find_connected_paths, BfsConfig, DirectedEdgeSet, Edge, UndirectedEdge,
    UndirectedEdgeSet,
};

/// Random DAG: edges always run from the lower to the higher node.
fn make_dag(node_count: u32, edges_per_node: usize) -> DirectedEdgeSet<Edge<u32>> {
    let mut rng = rand::thread_rng();
    let mut set: DirectedEdgeSet<Edge<u32>> = DirectedEdgeSet::new();
    for i in 0..node_count {
        for _ in 0..edges_per_node {
            let target = rng.gen_range(0..node_count);
            if target != i {
                let _ = set.add_edge(Edge::new(i.min(target), i.max(target)));
            }
        }
    }
    set
}

/// Complete binary tree with `levels` levels, node `n` having children
/// `2n + 1` and `2n + 2`.
fn make_tree(levels: u32) -> DirectedEdgeSet<Edge<u32>> {
    let last = (1u32 << (levels - 1)) - 1;
    let edges = (0..last).flat_map(|n| [Edge::new(n, 2 * n + 1), Edge::new(n, 2 * n + 2)]);
    DirectedEdgeSet::from_edges(edges).unwrap()
}

fn make_undirected(node_count: u32, edge_count: usize) -> UndirectedEdgeSet<UndirectedEdge<u32>> {
    let mut rng = rand::thread_rng();
    let mut set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
    for _ in 0..edge_count {
        let a = rng.gen_range(0..node_count);
        let b = rng.gen_range(0..node_count);
        let _ = set.add_edge(UndirectedEdge::new(a, b));
    }
    set
}

fn bench_add_edge(c: &mut Criterion) {
    let mut set = make_dag(10_000, 3);

    c.bench_function("add_edge_to_10k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let src = rng.gen_range(0..10_000u32);
            let tgt = rng.gen_range(0..10_000u32);
            let _ = set.add_edge(Edge::new(src, tgt));
        })
    });
}

fn bench_add_remove_edge(c: &mut Criterion) {
    let mut set = make_dag(10_000, 3);

    c.bench_function("add_remove_edge_10k", |b| {
        b.iter(|| {
            let edge = Edge::new(20_000, 20_001);
            let _ = set.add_edge(edge);
            set.remove_edge(&edge);
        })
    });
}

fn bench_bfs_full(c: &mut Criterion) {
    let set = make_dag(10_000, 3);

    c.bench_function("bfs_outgoing_10k", |b| {
        b.iter(|| outgoing_edges(&set, &0, BfsConfig::new()).count())
    });
}

fn bench_bfs_depth_5(c: &mut Criterion) {
    let set = make_dag(10_000, 3);

    c.bench_function("bfs_depth_5_10k", |b| {
        b.iter(|| outgoing_edges(&set, &0, BfsConfig::new().max_depth(5)).count())
    });
}

fn bench_common_parent(c: &mut Criterion) {
    let set = make_tree(14);
    // Two leaves in opposite halves of the tree: the answer is the root.
    let left = (1u32 << 13) - 1;
    let right = (1u32 << 14) - 2;

    c.bench_function("common_parent_tree_14", |b| {
        b.iter(|| common_parent(&set, [left, right]))
    });
}

fn bench_connected_edges(c: &mut Criterion) {
    let set = make_undirected(10_000, 15_000);

    c.bench_function("connected_edges_10k", |b| {
        b.iter(|| connected_edges(&set, &0, BfsConfig::new()).count())
    });
}

fn bench_components(c: &mut Criterion) {
    let set = make_undirected(10_000, 8_000);

    c.bench_function("components_10k", |b| {
        b.iter(|| find_connected_paths(&set).count())
    });
}

criterion_group!(
    benches,
    bench_add_edge,
    bench_add_remove_edge,
    bench_bfs_full,
    bench_bfs_depth_5,
    bench_common_parent,
    bench_connected_edges,
    bench_components,
);
criterion_main!(benches);
