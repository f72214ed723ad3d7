//! Dijkstra single-source shortest paths
//!
//! Every vertex starts in an [`IndexedMinHeap`] keyed by its tentative
//! distance; each extraction finalises one vertex and relaxes its outgoing
//! edges, lowering neighbour keys in place with decrease-key. Runs in
//! O((V + E) log V).
//!
//! Edge weights must be strictly positive. Unreachable vertices keep an
//! infinite distance and are reported as `None`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Algorithm, AlgorithmComplexity, AlgorithmError, NodeId};
use crate::data_structures::graph::{Graph, WeightedEdge, Weight};
use crate::data_structures::priority_queue::{HeapStats, IndexedMinHeap};

/// Tentative distance of a vertex nothing has reached yet
pub const UNREACHABLE: Weight = Weight::MAX;

/// Counters collected during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraStatistics {
    pub vertices_finalized: usize,
    pub edges_examined: usize,
    pub edges_relaxed: usize,
    pub heap: HeapStats,
}

/// Single-source shortest path engine
#[derive(Debug, Clone)]
pub struct ShortestPathEngine<'g> {
    graph: &'g Graph<WeightedEdge>,
    source: NodeId,
    distances: Vec<Weight>,
    predecessors: Vec<Option<NodeId>>,
    statistics: DijkstraStatistics,
    computed: bool,
}

impl<'g> ShortestPathEngine<'g> {
    /// Prepares a run from `source`; fails if `source` is not a vertex of `graph`
    pub fn new(graph: &'g Graph<WeightedEdge>, source: NodeId) -> Result<Self, AlgorithmError> {
        let node_count = graph.node_count();
        AlgorithmError::check_node(source, node_count)?;

        let mut distances = vec![UNREACHABLE; node_count];
        distances[source.0] = 0;

        Ok(Self {
            graph,
            source,
            distances,
            predecessors: vec![None; node_count],
            statistics: DijkstraStatistics::default(),
            computed: false,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Runs Dijkstra to completion. Later calls are no-ops.
    pub fn compute(&mut self) -> &mut Self {
        if self.computed {
            return self;
        }

        let node_count = self.graph.node_count();
        debug!(
            "dijkstra: {} vertices, {} edges, source {}",
            node_count,
            self.graph.edge_count(),
            self.source
        );

        let mut queue = IndexedMinHeap::with_capacity(node_count);
        for node in self.graph.nodes() {
            queue.insert(node, self.distances[node.0]);
        }

        while let Some((u, distance_u)) = queue.extract_min() {
            self.statistics.vertices_finalized += 1;
            trace!("dijkstra: finalized {u} at distance {distance_u}");

            if distance_u == UNREACHABLE {
                // Everything still queued is unreachable too, but draining keeps
                // the one-extraction-per-vertex accounting exact.
                continue;
            }

            for edge in self.graph.neighbors(u) {
                self.statistics.edges_examined += 1;
                let candidate = distance_u.saturating_add(edge.weight);
                let v = edge.to;

                if candidate < self.distances[v.0] {
                    self.distances[v.0] = candidate;
                    self.predecessors[v.0] = Some(u);
                    queue.decrease_key(v, candidate);
                    self.statistics.edges_relaxed += 1;
                    trace!("dijkstra: relaxed {u} -> {v}, distance {candidate}");
                }
            }
        }

        self.statistics.heap = queue.stats();
        self.computed = true;

        debug!(
            "dijkstra: done, {} of {} vertices reachable from {}",
            self.distances.iter().filter(|&&d| d != UNREACHABLE).count(),
            node_count,
            self.source
        );
        self
    }

    /// Shortest distance from the source to `target`, `None` when unreachable
    /// or when `target` is not a vertex
    pub fn shortest_distance(&self, target: NodeId) -> Option<Weight> {
        self.distances
            .get(target.0)
            .copied()
            .filter(|&distance| distance != UNREACHABLE)
    }

    /// Vertices on a shortest path from the source to `target`, both ends
    /// included; empty when `target` is unreachable
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        if self.shortest_distance(target).is_none() {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut at = Some(target);
        while let Some(node) = at {
            path.push(node);
            at = self.predecessors[node.0];
        }
        path.reverse();
        path
    }

    /// Raw distances, [`UNREACHABLE`] where no path exists
    pub fn distances(&self) -> &[Weight] {
        &self.distances
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(node.0).copied().flatten()
    }

    pub fn statistics(&self) -> &DijkstraStatistics {
        &self.statistics
    }
}

impl Algorithm for ShortestPathEngine<'_> {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn category(&self) -> &'static str {
        "shortest_path"
    }

    fn description(&self) -> String {
        "Single-source shortest paths over positively weighted directed edges, \
         using an indexed binary heap with decrease-key."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O((V + E) log V)", "O(V)")
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "source" => Some(self.source.to_string()),
            _ => None,
        }
    }
}
