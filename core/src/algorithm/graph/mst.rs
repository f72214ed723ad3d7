//! Minimum Spanning Tree via Prim's algorithm
//!
//! The tree grows from a start vertex. Every vertex waits in an
//! [`IndexedMinHeap`] keyed by the cheapest known edge connecting it to the
//! tree; extracting a vertex commits that edge, and its incident edges can
//! only lower the keys of vertices still outside.
//!
//! # Algorithmic Complexity
//!
//! - **Time**: O(E log V) with the binary heap
//! - **Space**: O(V) for keys, predecessors and membership flags
//!
//! A graph with more than one component has no spanning tree; the engine
//! reports that as `Ok(None)`. The only error is a total weight beyond `u64`. A [`UnionFind`] structure is
//! used to check a produced tree independently.
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_integer_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmParameter,
    NodeId, ParameterConstraints, ParameterType,
};
use crate::data_structures::graph::{Graph, WeightedEdge, Weight};
use crate::data_structures::priority_queue::{HeapStats, IndexedMinHeap};

const INFINITE_KEY: Weight = Weight::MAX;

/// Tree edge with canonical endpoint ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MSTEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Weight,
}

impl MSTEdge {
    pub fn new(source: NodeId, target: NodeId, weight: Weight) -> Self {
        // Ensure canonical ordering for undirected edges
        if source <= target {
            Self { source, target, weight }
        } else {
            Self { source: target, target: source, weight }
        }
    }
}

impl Ord for MSTEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for MSTEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Union-Find data structure with path compression and union by rank
///
/// Amortized O(α(n)) per operation, where α is the inverse Ackermann function.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent pointers for each element
    parent: Vec<usize>,
    /// Rank (upper bound on depth) of each tree
    rank: Vec<usize>,
    /// Number of disjoint sets
    num_components: usize,
}

impl UnionFind {
    /// Create a new Union-Find structure with n singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_components: n,
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Union two sets; returns `false` if x and y were already joined
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Less => self.parent[root_x] = root_y,
            Ordering::Greater => self.parent[root_y] = root_x,
            Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }

        self.num_components -= 1;
        true
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Get the number of disjoint sets
    pub fn components(&self) -> usize {
        self.num_components
    }
}

/// Minimum Spanning Tree result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MSTResult {
    /// Total weight of the minimum spanning tree
    pub total_weight: Weight,
    /// Tree edges, sorted by weight then endpoints
    pub edges: Vec<MSTEdge>,
    /// Vertex the tree was grown from
    pub start_vertex: NodeId,
    pub statistics: MSTStatistics,
}

/// Counters collected during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MSTStatistics {
    pub vertices_added: usize,
    pub edges_examined: usize,
    pub key_updates: usize,
    pub heap: HeapStats,
}

/// Prim minimum spanning tree engine over an undirected graph
#[derive(Debug, Clone)]
pub struct MinimumSpanningTreeEngine<'g> {
    graph: &'g Graph<WeightedEdge>,
    /// Algorithm parameters
    parameters: HashMap<String, String>,
    start_vertex: NodeId,
    statistics: MSTStatistics,
}

impl<'g> MinimumSpanningTreeEngine<'g> {
    pub fn new(graph: &'g Graph<WeightedEdge>) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("start_vertex".to_string(), "0".to_string());

        Self {
            graph,
            parameters,
            start_vertex: NodeId(0),
            statistics: MSTStatistics::default(),
        }
    }

    /// Grows a minimum spanning tree, `Ok(None)` when the graph is disconnected
    pub fn compute_mst(&mut self) -> Result<Option<MSTResult>, AlgorithmError> {
        self.statistics = MSTStatistics::default();

        let node_count = self.graph.node_count();
        let start = self.start_vertex;
        debug!(
            "prim: {} vertices, {} edges, start {}",
            node_count,
            self.graph.edge_count(),
            start
        );

        let mut key = vec![INFINITE_KEY; node_count];
        let mut predecessor: Vec<Option<NodeId>> = vec![None; node_count];
        let mut in_mst = vec![false; node_count];
        let mut total_weight: Weight = 0;

        if node_count > 0 {
            key[start.0] = 0;
        }

        let mut queue = IndexedMinHeap::with_capacity(node_count);
        for node in self.graph.nodes() {
            queue.insert(node, key[node.0]);
        }

        while let Some((u, key_u)) = queue.extract_min() {
            if key_u == INFINITE_KEY {
                // Cheapest remaining vertex cannot be reached from the tree
                debug!("prim: vertex {u} unreachable from {start}, graph is not connected");
                self.statistics.heap = queue.stats();
                return Ok(None);
            }

            in_mst[u.0] = true;
            total_weight = total_weight
                .checked_add(key_u)
                .ok_or(AlgorithmError::WeightOverflow("spanning tree weight"))?;
            self.statistics.vertices_added += 1;
            trace!("prim: added {u} with key {key_u}");

            for edge in self.graph.neighbors(u) {
                self.statistics.edges_examined += 1;
                let v = edge.to;
                if !in_mst[v.0] && edge.weight < key[v.0] {
                    key[v.0] = edge.weight;
                    predecessor[v.0] = Some(u);
                    queue.decrease_key(v, edge.weight);
                    self.statistics.key_updates += 1;
                }
            }
        }
        self.statistics.heap = queue.stats();

        if let Some(missing) = in_mst.iter().position(|&added| !added) {
            debug!("prim: vertex {missing} never joined the tree, graph is not connected");
            return Ok(None);
        }

        let mut edges: Vec<MSTEdge> = self
            .graph
            .nodes()
            .filter_map(|v| predecessor[v.0].map(|u| MSTEdge::new(u, v, key[v.0])))
            .collect();
        edges.sort();

        debug!("prim: tree weight {} over {} edges", total_weight, edges.len());

        Ok(Some(MSTResult {
            total_weight,
            edges,
            start_vertex: start,
            statistics: self.statistics.clone(),
        }))
    }

    /// Checks that `result` is a spanning tree of this engine's graph.
    ///
    /// Verifies the edge count (V-1), that every edge exists in the graph with
    /// the stated weight, that the edges form no cycle and connect all
    /// vertices, and that the total weight matches.
    pub fn validate_mst(&self, result: &MSTResult) -> Result<(), AlgorithmError> {
        let node_count = self.graph.node_count();
        let expected_edges = node_count.saturating_sub(1);

        if result.edges.len() != expected_edges {
            return Err(AlgorithmError::InvalidGraph(format!(
                "Invalid MST: expected {} edges, found {}",
                expected_edges,
                result.edges.len()
            )));
        }

        let mut uf = UnionFind::new(node_count);
        let mut sum: Weight = 0;
        for edge in &result.edges {
            AlgorithmError::check_node(edge.source, node_count)?;
            AlgorithmError::check_node(edge.target, node_count)?;

            let exists = self
                .graph
                .neighbors(edge.source)
                .iter()
                .any(|e| e.to == edge.target && e.weight == edge.weight);
            if !exists {
                return Err(AlgorithmError::InvalidGraph(format!(
                    "Invalid MST: edge {}-{} with weight {} is not in the graph",
                    edge.source, edge.target, edge.weight
                )));
            }

            if !uf.union(edge.source.0, edge.target.0) {
                return Err(AlgorithmError::InvalidGraph(
                    "Invalid MST: contains cycle".to_string(),
                ));
            }
            sum = sum
                .checked_add(edge.weight)
                .ok_or(AlgorithmError::WeightOverflow("spanning tree weight"))?;
        }

        if node_count > 0 && uf.components() != 1 {
            return Err(AlgorithmError::InvalidGraph(
                "Invalid MST: not connected".to_string(),
            ));
        }

        if sum != result.total_weight {
            return Err(AlgorithmError::InvalidGraph(format!(
                "Invalid MST: edges sum to {}, reported total is {}",
                sum, result.total_weight
            )));
        }

        Ok(())
    }

    pub fn start_vertex(&self) -> NodeId {
        self.start_vertex
    }

    /// Get statistics of the latest run
    pub fn statistics(&self) -> &MSTStatistics {
        &self.statistics
    }
}

impl Algorithm for MinimumSpanningTreeEngine<'_> {
    fn name(&self) -> &'static str {
        "Prim"
    }

    fn category(&self) -> &'static str {
        "minimum_spanning_tree"
    }

    fn description(&self) -> String {
        "Prim's minimum spanning tree over an undirected weighted graph, growing \
         the tree from a start vertex with an indexed binary heap."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(E log V)", "O(V)")
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter {
            name: "start_vertex".to_string(),
            value: self.start_vertex.to_string(),
            value_type: ParameterType::Integer,
            constraints: Some(ParameterConstraints {
                min: Some(0),
                max: Some(self.graph.node_count().saturating_sub(1) as u64),
            }),
        }]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "start_vertex" => {
                let vertex = NodeId(parse_integer_parameter(name, value)?);
                if !self.graph.contains_node(vertex) {
                    return Err(AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!(
                            "vertex {} is outside a graph of {} vertices",
                            vertex,
                            self.graph.node_count()
                        ),
                    });
                }
                self.start_vertex = vertex;
                self.parameters.insert(name.to_string(), vertex.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: format!("Unknown parameter: {name}"),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph<WeightedEdge> {
        let mut graph = Graph::undirected(3);
        graph.add_undirected_edge(NodeId(0), NodeId(1), 1);
        graph.add_undirected_edge(NodeId(1), NodeId(2), 2);
        graph.add_undirected_edge(NodeId(0), NodeId(2), 3);
        graph
    }

    #[test]
    fn test_triangle_scenario() {
        let graph = triangle();
        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        let result = mst.compute_mst().unwrap().expect("triangle is connected");

        assert_eq!(result.total_weight, 3);
        assert_eq!(
            result.edges,
            vec![
                MSTEdge::new(NodeId(0), NodeId(1), 1),
                MSTEdge::new(NodeId(1), NodeId(2), 2),
            ]
        );
        assert!(mst.validate_mst(&result).is_ok());
    }

    #[test]
    fn test_disconnected_graph() {
        let mut graph = Graph::undirected(4);
        graph.add_undirected_edge(NodeId(0), NodeId(1), 5);
        graph.add_undirected_edge(NodeId(2), NodeId(3), 1);

        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        assert!(mst.compute_mst().unwrap().is_none());
    }

    #[test]
    fn test_isolated_vertex_is_disconnected() {
        let mut graph = Graph::undirected(3);
        graph.add_undirected_edge(NodeId(0), NodeId(1), 5);

        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        assert!(mst.compute_mst().unwrap().is_none());
    }

    #[test]
    fn test_trivial_graphs() {
        let empty = Graph::undirected(0);
        let result = MinimumSpanningTreeEngine::new(&empty).compute_mst().unwrap().unwrap();
        assert_eq!(result.total_weight, 0);
        assert!(result.edges.is_empty());

        let single = Graph::undirected(1);
        let mut mst = MinimumSpanningTreeEngine::new(&single);
        let result = mst.compute_mst().unwrap().unwrap();
        assert_eq!(result.total_weight, 0);
        assert!(mst.validate_mst(&result).is_ok());
    }

    #[test]
    fn test_start_vertex_does_not_change_weight() {
        let graph = triangle();
        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        mst.set_parameter("start_vertex", "2").unwrap();

        let result = mst.compute_mst().unwrap().unwrap();
        assert_eq!(result.start_vertex, NodeId(2));
        assert_eq!(result.total_weight, 3);
    }

    #[test]
    fn test_parallel_edges_and_self_loops() {
        let mut graph = Graph::undirected(2);
        graph.add_undirected_edge(NodeId(0), NodeId(0), 1);
        graph.add_undirected_edge(NodeId(0), NodeId(1), 9);
        graph.add_undirected_edge(NodeId(1), NodeId(0), 4);

        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        let result = mst.compute_mst().unwrap().unwrap();
        assert_eq!(result.total_weight, 4);
        assert!(mst.validate_mst(&result).is_ok());
    }

    #[test]
    fn test_tree_weight_overflow_is_an_error() {
        let mut graph = Graph::undirected(4);
        for v in 1..4 {
            graph.add_undirected_edge(NodeId(v - 1), NodeId(v), Weight::MAX / 2);
        }

        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        assert_eq!(
            mst.compute_mst().unwrap_err(),
            AlgorithmError::WeightOverflow("spanning tree weight")
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_total() {
        let mut graph = Graph::undirected(3);
        graph.add_undirected_edge(NodeId(0), NodeId(1), Weight::MAX);
        graph.add_undirected_edge(NodeId(1), NodeId(2), 1);

        let mst = MinimumSpanningTreeEngine::new(&graph);
        let claimed = MSTResult {
            total_weight: Weight::MAX,
            edges: vec![
                MSTEdge::new(NodeId(0), NodeId(1), Weight::MAX),
                MSTEdge::new(NodeId(1), NodeId(2), 1),
            ],
            start_vertex: NodeId(0),
            statistics: MSTStatistics::default(),
        };
        assert_eq!(
            mst.validate_mst(&claimed),
            Err(AlgorithmError::WeightOverflow("spanning tree weight"))
        );
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);

        assert_eq!(uf.components(), 5);
        assert!(!uf.connected(0, 1));

        assert!(uf.union(0, 1));
        assert!(uf.connected(0, 1));
        assert_eq!(uf.components(), 4);

        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(uf.connected(0, 2));
        assert_eq!(uf.components(), 2);

        // Redundant union
        assert!(!uf.union(0, 3));
        assert_eq!(uf.components(), 2);
    }

    #[test]
    fn test_mst_edge_ordering() {
        let edge1 = MSTEdge::new(NodeId(0), NodeId(1), 1);
        let edge2 = MSTEdge::new(NodeId(1), NodeId(2), 2);
        let edge3 = MSTEdge::new(NodeId(2), NodeId(0), 1);

        assert!(edge1 < edge2);
        assert!(edge1 < edge3);
        assert_eq!(edge3.source, NodeId(0));
        assert_eq!(edge3.target, NodeId(2));
    }

    #[test]
    fn test_validate_rejects_bad_trees() {
        let graph = triangle();
        let mst = MinimumSpanningTreeEngine::new(&graph);

        let cyclic = MSTResult {
            total_weight: 3,
            edges: vec![
                MSTEdge::new(NodeId(0), NodeId(1), 1),
                MSTEdge::new(NodeId(0), NodeId(1), 1),
            ],
            start_vertex: NodeId(0),
            statistics: MSTStatistics::default(),
        };
        assert!(mst.validate_mst(&cyclic).is_err());

        let phantom = MSTResult {
            edges: vec![
                MSTEdge::new(NodeId(0), NodeId(1), 1),
                MSTEdge::new(NodeId(1), NodeId(2), 7),
            ],
            total_weight: 8,
            ..cyclic.clone()
        };
        assert!(mst.validate_mst(&phantom).is_err());

        let wrong_total = MSTResult {
            edges: vec![
                MSTEdge::new(NodeId(0), NodeId(1), 1),
                MSTEdge::new(NodeId(1), NodeId(2), 2),
            ],
            total_weight: 4,
            ..cyclic
        };
        assert!(mst.validate_mst(&wrong_total).is_err());
    }

    #[test]
    fn test_parameter_validation() {
        let graph = triangle();
        let mut mst = MinimumSpanningTreeEngine::new(&graph);

        assert_eq!(mst.get_parameter("start_vertex"), Some("0".to_string()));
        assert!(mst.set_parameter("start_vertex", "1").is_ok());
        assert_eq!(mst.get_parameter("start_vertex"), Some("1".to_string()));

        assert!(mst.set_parameter("start_vertex", "3").is_err());
        assert!(mst.set_parameter("start_vertex", "abc").is_err());
        assert!(mst.set_parameter("unknown", "1").is_err());
        assert_eq!(mst.start_vertex(), NodeId(1));
        assert_eq!(mst.parameters().len(), 1);
    }

    #[test]
    fn test_statistics_tracking() {
        let graph = triangle();
        let mut mst = MinimumSpanningTreeEngine::new(&graph);
        mst.compute_mst().unwrap().unwrap();

        let stats = mst.statistics();
        assert_eq!(stats.vertices_added, 3);
        // Each undirected edge is seen from both endpoints
        assert_eq!(stats.edges_examined, 6);
        assert_eq!(stats.heap.extractions, 3);
    }
}
