//! Adjacency-list graph parameterised over its edge payload
//!
//! A single container serves all three engines. The edge payload decides
//! what a graph can do: [`WeightedEdge`] graphs are directed or undirected and
//! read-only once built, while [`ResidualEdge`] graphs pair every forward edge
//! with a reverse edge so residual capacities can be updated in place.
//!
//! Vertices are dense ids in `[0, n)`. Insertion methods index adjacency
//! lists directly; ids and weights are validated by the caller (see
//! [`crate::input`]).

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::NodeId;

/// Edge weight and flow capacity type
pub type Weight = u64;

/// Whether edges are one-way or recorded at both endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// Weighted edge as seen from the vertex whose list holds it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub to: NodeId,
    pub weight: Weight,
}

/// Residual edge of a flow network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualEdge {
    pub to: NodeId,
    /// Remaining capacity, mutated while augmenting
    pub capacity: Weight,
    /// Capacity the edge was created with (zero for reverse edges)
    pub original_capacity: Weight,
    /// Index of the paired edge in `to`'s adjacency list
    pub reverse: usize,
}

impl ResidualEdge {
    /// Whether this is the forward half of an inserted edge pair
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.original_capacity > 0
    }

    /// Flow currently carried by a forward edge
    #[inline]
    pub fn flow(&self) -> Weight {
        self.original_capacity.saturating_sub(self.capacity)
    }
}

/// Adjacency-list graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph<E> {
    kind: GraphKind,
    adjacency: Vec<Vec<E>>,
    /// Number of logical edges inserted (an undirected or flow edge counts once)
    edge_count: usize,
}

impl<E> Graph<E> {
    fn with_kind(kind: GraphKind, node_count: usize) -> Self {
        let mut adjacency = Vec::with_capacity(node_count);
        adjacency.resize_with(node_count, Vec::new);
        Self {
            kind,
            adjacency,
            edge_count: 0,
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.0 < self.adjacency.len()
    }

    /// Edges stored in `node`'s adjacency list
    pub fn neighbors(&self, node: NodeId) -> &[E] {
        &self.adjacency[node.0]
    }

    /// Iterator over all vertex ids
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.adjacency.len()).map(NodeId)
    }
}

impl Graph<WeightedEdge> {
    /// Creates a directed graph with `node_count` empty adjacency lists
    pub fn directed(node_count: usize) -> Self {
        Self::with_kind(GraphKind::Directed, node_count)
    }

    /// Creates an undirected graph with `node_count` empty adjacency lists
    pub fn undirected(node_count: usize) -> Self {
        Self::with_kind(GraphKind::Undirected, node_count)
    }

    /// Appends `from -> to` to `from`'s list
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        self.adjacency[from.0].push(WeightedEdge { to, weight });
        self.edge_count += 1;
    }

    /// Records the edge `v1 - v2` in both endpoints' lists
    pub fn add_undirected_edge(&mut self, v1: NodeId, v2: NodeId, weight: Weight) {
        self.adjacency[v1.0].push(WeightedEdge { to: v2, weight });
        self.adjacency[v2.0].push(WeightedEdge { to: v1, weight });
        self.edge_count += 1;
    }

    /// Inserts an edge according to the graph's kind
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        match self.kind {
            GraphKind::Directed => self.add_directed_edge(from, to, weight),
            GraphKind::Undirected => self.add_undirected_edge(from, to, weight),
        }
    }

    /// Every logical edge once, as `(from, to, weight)`.
    ///
    /// Undirected edges are reported from their smaller endpoint, self-loops
    /// once per insertion.
    pub fn edges(&self) -> Vec<(NodeId, NodeId, Weight)> {
        let mut out = Vec::with_capacity(self.edge_count);
        let mut pending_loops = false;
        for (from, list) in self.adjacency.iter().enumerate() {
            for edge in list {
                match self.kind {
                    GraphKind::Directed => out.push((NodeId(from), edge.to, edge.weight)),
                    GraphKind::Undirected if from < edge.to.0 => {
                        out.push((NodeId(from), edge.to, edge.weight))
                    }
                    GraphKind::Undirected if from == edge.to.0 => {
                        // A self-loop occupies two consecutive slots in its list
                        pending_loops = !pending_loops;
                        if pending_loops {
                            out.push((NodeId(from), edge.to, edge.weight));
                        }
                    }
                    GraphKind::Undirected => {}
                }
            }
        }
        out
    }
}

impl Graph<ResidualEdge> {
    /// Creates a flow network with `node_count` empty adjacency lists
    pub fn flow_network(node_count: usize) -> Self {
        Self::with_kind(GraphKind::Directed, node_count)
    }

    /// Adds `from -> to` with `capacity` plus its zero-capacity reverse edge
    pub fn add_flow_edge(&mut self, from: NodeId, to: NodeId, capacity: Weight) {
        let forward_index = self.adjacency[from.0].len();
        // With a self-loop the forward edge lands in the same list first
        let reverse_index = self.adjacency[to.0].len() + usize::from(from == to);

        self.adjacency[from.0].push(ResidualEdge {
            to,
            capacity,
            original_capacity: capacity,
            reverse: reverse_index,
        });
        self.adjacency[to.0].push(ResidualEdge {
            to: from,
            capacity: 0,
            original_capacity: 0,
            reverse: forward_index,
        });
        self.edge_count += 1;
    }

    /// The edge paired with `node`'s `index`-th edge
    pub fn paired_edge(&self, node: NodeId, index: usize) -> &ResidualEdge {
        let edge = &self.adjacency[node.0][index];
        &self.adjacency[edge.to.0][edge.reverse]
    }

    /// Moves `amount` units of residual capacity from `node`'s `index`-th edge
    /// to its paired reverse edge
    pub(crate) fn push_flow(&mut self, node: NodeId, index: usize, amount: Weight) {
        let (to, reverse) = {
            let edge = &mut self.adjacency[node.0][index];
            edge.capacity -= amount;
            (edge.to, edge.reverse)
        };
        self.adjacency[to.0][reverse].capacity += amount;
    }
}
