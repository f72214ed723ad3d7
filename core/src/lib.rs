//! FLOWPATH core
//!
//! Three classic graph engines sharing one indexed binary min-heap and one
//! adjacency-list graph:
//!
//! - [`ShortestPathEngine`]: Dijkstra single-source shortest paths
//! - [`MinimumSpanningTreeEngine`]: Prim minimum spanning tree
//! - [`MaxFlowEngine`]: Edmonds-Karp maximum flow
//!
//! All computation is single-threaded and in-memory. Graphs are built once
//! (usually through [`input::GraphInput`], which validates ids and weights)
//! and then handed to an engine.
//!
//! ```
//! use flowpath_core::{Graph, NodeId, ShortestPathEngine};
//!
//! let mut graph = Graph::directed(3);
//! graph.add_directed_edge(NodeId(0), NodeId(1), 2);
//! graph.add_directed_edge(NodeId(1), NodeId(2), 2);
//!
//! let mut engine = ShortestPathEngine::new(&graph, NodeId(0)).unwrap();
//! engine.compute();
//! assert_eq!(engine.shortest_distance(NodeId(2)), Some(4));
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod input;

pub use algorithm::{
    Algorithm, AlgorithmComplexity, AlgorithmError, DijkstraStatistics, EdgeFlow,
    FlowStatistics, MSTEdge, MSTResult, MSTStatistics, MaxFlowEngine, MaxFlowResult,
    MinimumSpanningTreeEngine, NodeId, ShortestPathEngine, UnionFind, UNREACHABLE,
};
pub use data_structures::{
    Graph, GraphKind, HeapStats, IndexedMinHeap, ResidualEdge, Weight, WeightedEdge,
};
pub use input::{GraphInput, InputError, MAX_VERTICES, MAX_WEIGHT};

/// Crate version, as recorded in Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
