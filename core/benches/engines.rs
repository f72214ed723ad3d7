use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flowpath_core::{
    Graph, IndexedMinHeap, MaxFlowEngine, MinimumSpanningTreeEngine, NodeId, ShortestPathEngine,
};

/// Deterministic pseudo-random edges from a linear congruential generator
fn edges(nodes: usize, count: usize, max_weight: u64) -> Vec<(NodeId, NodeId, u64)> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    (0..count)
        .map(|_| {
            let from = NodeId(next() as usize % nodes);
            let to = NodeId(next() as usize % nodes);
            (from, to, 1 + next() % max_weight)
        })
        .collect()
}

fn bench_heap(c: &mut Criterion) {
    const N: usize = 10_000;

    c.bench_function("heap_insert_decrease_drain", |b| {
        b.iter(|| {
            let mut queue = IndexedMinHeap::with_capacity(N);
            for i in 0..N {
                queue.insert(NodeId(i), (N - i) as u64 * 2);
            }
            for i in (0..N).step_by(3) {
                queue.decrease_key(NodeId(i), i as u64);
            }
            while let Some(entry) = queue.extract_min() {
                black_box(entry);
            }
        });
    });
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut graph = Graph::directed(2_000);
    for (from, to, weight) in edges(2_000, 20_000, 100) {
        graph.add_directed_edge(from, to, weight);
    }

    c.bench_function("dijkstra_2k_20k", |b| {
        b.iter(|| {
            let mut engine = ShortestPathEngine::new(&graph, NodeId(0)).unwrap();
            engine.compute();
            black_box(engine.shortest_distance(NodeId(1_999)));
        });
    });
}

fn bench_prim(c: &mut Criterion) {
    let mut graph = Graph::undirected(2_000);
    for i in 1..2_000 {
        graph.add_undirected_edge(NodeId(i - 1), NodeId(i), 1_000);
    }
    for (from, to, weight) in edges(2_000, 20_000, 100) {
        graph.add_undirected_edge(from, to, weight);
    }

    c.bench_function("prim_2k_20k", |b| {
        b.iter(|| black_box(MinimumSpanningTreeEngine::new(&graph).compute_mst().unwrap()));
    });
}

fn bench_max_flow(c: &mut Criterion) {
    let mut network = Graph::flow_network(500);
    for (from, to, capacity) in edges(500, 4_000, 50) {
        network.add_flow_edge(from, to, capacity);
    }

    c.bench_function("edmonds_karp_500_4k", |b| {
        b.iter(|| {
            let mut engine = MaxFlowEngine::new(network.clone());
            black_box(engine.max_flow(NodeId(0), NodeId(499)).unwrap());
        });
    });
}

criterion_group!(benches, bench_heap, bench_dijkstra, bench_prim, bench_max_flow);
criterion_main!(benches);
