//! Text graph reader with boundary validation
//!
//! The engines assume vertex ids are in range and weights are positive. This
//! module is where that is enforced: it reads the whitespace-separated format
//!
//! ```text
//! <vertex count> <edge count>
//! <from> <to> <weight>      (edge count times)
//! ```
//!
//! and rejects anything the engines must never see. Tokens after the last
//! edge are ignored.
//!
//! Vertex counts are capped at [`MAX_VERTICES`] and weights at [`MAX_WEIGHT`].
//! Under those caps no path length or tree weight can exceed `u64`.

use std::fmt;
use std::io::Read;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;
use crate::data_structures::graph::{Graph, ResidualEdge, WeightedEdge, Weight};

/// Largest vertex count accepted from text input
pub const MAX_VERTICES: usize = 1 << 24;

/// Largest edge weight or capacity accepted from text input
pub const MAX_WEIGHT: Weight = u32::MAX as Weight;

/// Which value of an edge triple was being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeField {
    Start,
    End,
    Weight,
}

impl fmt::Display for EdgeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeField::Start => "edge start vertex",
            EdgeField::End => "edge end vertex",
            EdgeField::Weight => "edge weight",
        })
    }
}

/// Reasons a graph description is rejected
#[derive(Debug, Error)]
pub enum InputError {
    #[error("please enter number of vertices")]
    MissingVertexCount,

    #[error("please enter number of edges")]
    MissingEdgeCount,

    #[error("{field} expected for edge {edge}")]
    MissingField { edge: usize, field: EdgeField },

    #[error("expected an integer for {what}, found {token:?}")]
    NotAnInteger { what: String, token: String },

    #[error("{what} must not be negative, found {value}")]
    NegativeCount { what: &'static str, value: i64 },

    #[error("number of vertices must be at most {max}, found {value}")]
    TooManyVertices { value: usize, max: usize },

    #[error("vertex numbers must be between 0 and {max} (edge {edge}: {from} -> {to})")]
    VertexOutOfRange {
        edge: usize,
        from: i64,
        to: i64,
        /// Largest valid id, `-1` for an empty graph
        max: i64,
    },

    #[error("edge weight must be a positive integer (edge {edge} has weight {weight})")]
    NonPositiveWeight { edge: usize, weight: i64 },

    #[error("edge weight must be at most {max} (edge {edge} has weight {weight})")]
    WeightTooLarge { edge: usize, weight: i64, max: Weight },

    #[error("vertex {vertex} must be between 0 and {max}")]
    InvalidVertex { vertex: i64, max: i64 },

    #[error("failed to read graph input: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated graph description, ready to be turned into any graph flavour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    vertex_count: usize,
    edges: Vec<(NodeId, NodeId, Weight)>,
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    /// Next token as an integer; `Ok(None)` when input is exhausted
    fn next_integer(&mut self, what: impl FnOnce() -> String) -> Result<Option<i64>, InputError> {
        match self.inner.next() {
            None => Ok(None),
            Some(token) => token.parse::<i64>().map(Some).map_err(|_| InputError::NotAnInteger {
                what: what(),
                token: token.to_string(),
            }),
        }
    }
}

impl GraphInput {
    /// Parses and validates a graph description
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut tokens = Tokens::new(text);

        let vertex_count = tokens
            .next_integer(|| "the number of vertices".to_string())?
            .ok_or(InputError::MissingVertexCount)?;
        let vertex_count = non_negative(vertex_count, "number of vertices")?;
        if vertex_count > MAX_VERTICES {
            return Err(InputError::TooManyVertices {
                value: vertex_count,
                max: MAX_VERTICES,
            });
        }

        let edge_count = tokens
            .next_integer(|| "the number of edges".to_string())?
            .ok_or(InputError::MissingEdgeCount)?;
        let edge_count = non_negative(edge_count, "number of edges")?;

        let mut edges = Vec::with_capacity(edge_count.min(1 << 16));
        for edge in 0..edge_count {
            let mut field = |field: EdgeField| -> Result<i64, InputError> {
                tokens
                    .next_integer(|| format!("{field} of edge {edge}"))?
                    .ok_or(InputError::MissingField { edge, field })
            };
            let from = field(EdgeField::Start)?;
            let to = field(EdgeField::End)?;
            let weight = field(EdgeField::Weight)?;

            let in_range = |v: i64| v >= 0 && (v as u64) < vertex_count as u64;
            if !in_range(from) || !in_range(to) {
                return Err(InputError::VertexOutOfRange {
                    edge,
                    from,
                    to,
                    max: largest_id(vertex_count),
                });
            }
            if weight <= 0 {
                return Err(InputError::NonPositiveWeight { edge, weight });
            }
            if weight as u64 > MAX_WEIGHT {
                return Err(InputError::WeightTooLarge {
                    edge,
                    weight,
                    max: MAX_WEIGHT,
                });
            }

            edges.push((NodeId(from as usize), NodeId(to as usize), weight as Weight));
        }

        debug!("input: read {} vertices and {} edges", vertex_count, edges.len());
        Ok(Self { vertex_count, edges })
    }

    /// Reads everything from `reader` and parses it
    pub fn read_from(mut reader: impl Read) -> Result<Self, InputError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edges(&self) -> &[(NodeId, NodeId, Weight)] {
        &self.edges
    }

    /// Checks an externally supplied vertex id (source, target, sink)
    pub fn validate_vertex(&self, vertex: i64) -> Result<NodeId, InputError> {
        validate_vertex(vertex, self.vertex_count)
    }

    pub fn to_directed_graph(&self) -> Graph<WeightedEdge> {
        let mut graph = Graph::directed(self.vertex_count);
        for &(from, to, weight) in &self.edges {
            graph.add_directed_edge(from, to, weight);
        }
        graph
    }

    pub fn to_undirected_graph(&self) -> Graph<WeightedEdge> {
        let mut graph = Graph::undirected(self.vertex_count);
        for &(from, to, weight) in &self.edges {
            graph.add_undirected_edge(from, to, weight);
        }
        graph
    }

    pub fn to_flow_network(&self) -> Graph<ResidualEdge> {
        let mut network = Graph::flow_network(self.vertex_count);
        for &(from, to, capacity) in &self.edges {
            network.add_flow_edge(from, to, capacity);
        }
        network
    }
}

/// Checks that `vertex` names one of `vertex_count` vertices
pub fn validate_vertex(vertex: i64, vertex_count: usize) -> Result<NodeId, InputError> {
    if vertex >= 0 && (vertex as u64) < vertex_count as u64 {
        Ok(NodeId(vertex as usize))
    } else {
        Err(InputError::InvalidVertex {
            vertex,
            max: largest_id(vertex_count),
        })
    }
}

fn largest_id(vertex_count: usize) -> i64 {
    i64::try_from(vertex_count).map_or(i64::MAX, |n| n - 1)
}

fn non_negative(value: i64, what: &'static str) -> Result<usize, InputError> {
    usize::try_from(value).map_err(|_| InputError::NegativeCount { what, value })
}
