//! Maximum flow via Edmonds-Karp
//!
//! Ford-Fulkerson with breadth-first augmenting path selection. Each round
//! finds a shortest source-sink path in the residual graph, pushes its
//! bottleneck capacity along it, and moves that capacity onto the paired
//! reverse edges. At most O(VE) augmentations are needed, each costing one
//! O(E) search, for O(VE²) overall.
//!
//! The engine owns its residual network and mutates it in place; after a run
//! the network describes the final flow and the source side of a minimum cut.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Algorithm, AlgorithmComplexity, AlgorithmError, NodeId};
use crate::data_structures::graph::{Graph, ResidualEdge, Weight};

/// Flow carried by one inserted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: Weight,
    pub capacity: Weight,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStatistics {
    /// Number of augmenting paths pushed
    pub augmenting_paths: usize,
    /// Breadth-first searches run, including the final unsuccessful one
    pub searches: usize,
    /// Vertices dequeued across all searches
    pub vertices_visited: usize,
    /// Sum of augmenting path lengths, in edges
    pub path_edges: usize,
    pub total_flow: Weight,
}

/// Maximum flow result with cut information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub max_flow: Weight,
    /// Vertices on the source side of a minimum cut
    pub min_cut: Vec<NodeId>,
    /// Flow on each inserted edge, in insertion order per source vertex
    pub edge_flows: Vec<EdgeFlow>,
    pub statistics: FlowStatistics,
}

/// Edmonds-Karp maximum flow engine
#[derive(Debug, Clone)]
pub struct MaxFlowEngine {
    network: Graph<ResidualEdge>,
    /// Source of the latest run, used for cut queries
    last_source: Option<NodeId>,
    statistics: FlowStatistics,
}

impl MaxFlowEngine {
    pub fn new(network: Graph<ResidualEdge>) -> Self {
        Self {
            network,
            last_source: None,
            statistics: FlowStatistics::default(),
        }
    }

    /// Pushes flow from `source` to `sink` until no augmenting path remains
    /// and returns the total pushed by this call.
    ///
    /// Fails with [`AlgorithmError::WeightOverflow`] when the total exceeds
    /// `u64`; the residual network then holds the flow pushed so far.
    ///
    /// A second call on the same engine continues from the residual network
    /// left by the first and therefore returns 0 for the same pair.
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> Result<Weight, AlgorithmError> {
        let node_count = self.network.node_count();
        AlgorithmError::check_node(source, node_count)?;
        AlgorithmError::check_node(sink, node_count)?;

        self.statistics = FlowStatistics::default();
        self.last_source = Some(source);

        debug!(
            "edmonds-karp: {} vertices, {} edges, {} -> {}",
            node_count,
            self.network.edge_count(),
            source,
            sink
        );

        if source == sink {
            debug!("edmonds-karp: source equals sink, no flow to push");
            return Ok(0);
        }

        // parent[v] = (previous vertex, index of the edge in its list)
        let mut parent: Vec<Option<(NodeId, usize)>> = vec![None; node_count];
        let mut total_flow: Weight = 0;

        while self.find_augmenting_path(source, sink, &mut parent) {
            let mut bottleneck = Weight::MAX;
            let mut current = sink;
            let mut path_edges = 0;
            while current != source {
                // The search only reports success with a full parent chain
                let Some((prev, index)) = parent[current.0] else {
                    break;
                };
                bottleneck = bottleneck.min(self.network.neighbors(prev)[index].capacity);
                current = prev;
                path_edges += 1;
            }

            let mut current = sink;
            while current != source {
                let Some((prev, index)) = parent[current.0] else {
                    break;
                };
                self.network.push_flow(prev, index, bottleneck);
                current = prev;
            }

            total_flow = total_flow
                .checked_add(bottleneck)
                .ok_or(AlgorithmError::WeightOverflow("total flow"))?;
            self.statistics.augmenting_paths += 1;
            self.statistics.path_edges += path_edges;
            trace!(
                "edmonds-karp: augmented {} units over {} edges, total {}",
                bottleneck,
                path_edges,
                total_flow
            );
        }

        self.statistics.total_flow = total_flow;
        debug!(
            "edmonds-karp: max flow {} after {} augmenting paths",
            total_flow, self.statistics.augmenting_paths
        );
        Ok(total_flow)
    }

    /// Breadth-first search over edges with remaining capacity.
    ///
    /// Fills `parent` for every discovered vertex and stops as soon as `sink`
    /// is discovered. Returns whether `sink` was reached.
    fn find_augmenting_path(
        &mut self,
        source: NodeId,
        sink: NodeId,
        parent: &mut [Option<(NodeId, usize)>],
    ) -> bool {
        self.statistics.searches += 1;
        parent.fill(None);

        let mut visited = vec![false; self.network.node_count()];
        visited[source.0] = true;

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            self.statistics.vertices_visited += 1;

            for (index, edge) in self.network.neighbors(u).iter().enumerate() {
                let v = edge.to;
                if visited[v.0] || edge.capacity == 0 {
                    continue;
                }

                visited[v.0] = true;
                parent[v.0] = Some((u, index));
                if v == sink {
                    return true;
                }
                queue.push_back(v);
            }
        }

        false
    }

    /// Vertices reachable from the latest source in the residual network.
    ///
    /// After [`max_flow`](Self::max_flow) has finished these form the source
    /// side of a minimum cut. Empty before any run.
    pub fn min_cut_source_side(&self) -> Vec<NodeId> {
        let Some(source) = self.last_source else {
            return Vec::new();
        };

        let mut visited = vec![false; self.network.node_count()];
        visited[source.0] = true;
        let mut queue = VecDeque::from([source]);

        while let Some(u) = queue.pop_front() {
            for edge in self.network.neighbors(u) {
                if edge.capacity > 0 && !visited[edge.to.0] {
                    visited[edge.to.0] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        self.network
            .nodes()
            .filter(|node| visited[node.0])
            .collect()
    }

    /// Flow on every inserted (forward) edge
    pub fn edge_flows(&self) -> Vec<EdgeFlow> {
        self.network
            .nodes()
            .flat_map(|from| {
                self.network
                    .neighbors(from)
                    .iter()
                    .filter(|edge| edge.is_forward())
                    .map(move |edge| EdgeFlow {
                        from,
                        to: edge.to,
                        flow: edge.flow(),
                        capacity: edge.original_capacity,
                    })
            })
            .collect()
    }

    /// Flow leaving `node` minus flow entering it, over forward edges.
    ///
    /// Zero for every vertex other than the source and sink once a run is
    /// complete.
    pub fn net_outflow(&self, node: NodeId) -> i128 {
        let mut net: i128 = 0;
        for flow in self.edge_flows() {
            if flow.from == node {
                net += i128::from(flow.flow);
            }
            if flow.to == node {
                net -= i128::from(flow.flow);
            }
        }
        net
    }

    /// Runs [`max_flow`](Self::max_flow) and gathers cut and per-edge flows
    pub fn solve(&mut self, source: NodeId, sink: NodeId) -> Result<MaxFlowResult, AlgorithmError> {
        let max_flow = self.max_flow(source, sink)?;
        Ok(MaxFlowResult {
            max_flow,
            min_cut: self.min_cut_source_side(),
            edge_flows: self.edge_flows(),
            statistics: self.statistics.clone(),
        })
    }

    pub fn network(&self) -> &Graph<ResidualEdge> {
        &self.network
    }

    /// Gives the residual network back, consuming the engine
    pub fn into_network(self) -> Graph<ResidualEdge> {
        self.network
    }

    pub fn statistics(&self) -> &FlowStatistics {
        &self.statistics
    }
}

impl Algorithm for MaxFlowEngine {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Edmonds-Karp maximum flow: Ford-Fulkerson with breadth-first shortest \
         augmenting paths over a residual network of paired edges."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V E^2)", "O(V + E)")
    }
}
