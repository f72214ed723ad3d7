//! Core algorithm trait definitions for the FLOWPATH engines
//!
//! Every engine in this crate exposes the same descriptive surface: a name,
//! a category, an asymptotic complexity summary, and a small string-typed
//! parameter table that is validated on write. Vertex identifiers are wrapped
//! in [`NodeId`] so they cannot be mixed up with weights or heap positions.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Error types for algorithm and data structure operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid node: {node} (graph has {node_count} vertices)")]
    InvalidNode { node: NodeId, node_count: usize },

    #[error("Invalid graph state: {0}")]
    InvalidGraph(String),

    #[error("Weight overflow: {0} does not fit in a 64-bit weight")]
    WeightOverflow(&'static str),

    #[error("Heap order violated between position {parent} and its child {child}")]
    HeapInvariantViolation { parent: usize, child: usize },

    #[error("Position index for {id} records {recorded:?}, but it sits at {actual:?}")]
    PositionMismatch {
        id: NodeId,
        recorded: Option<usize>,
        actual: Option<usize>,
    },
}

impl AlgorithmError {
    /// Checks that `node` is a valid vertex of a graph with `node_count` vertices
    pub fn check_node(node: NodeId, node_count: usize) -> Result<(), AlgorithmError> {
        if node.0 < node_count {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidNode { node, node_count })
        }
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

impl AlgorithmComplexity {
    pub fn new(time: &str, space: &str) -> Self {
        Self {
            time_complexity: time.to_owned(),
            space_complexity: space.to_owned(),
        }
    }
}

/// Descriptive and configuration surface shared by every engine
pub trait Algorithm: Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., shortest_path, max_flow)
    fn category(&self) -> &'static str;

    /// Returns a one-paragraph description of what the engine computes
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter> {
        Vec::new()
    }

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, _value: &str) -> Result<(), AlgorithmError> {
        Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("{} accepts no parameter with this name", self.name()),
        })
    }

    /// Gets algorithm parameter value
    fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Parses an unsigned integer parameter, mapping failures to `InvalidParameter`
pub(crate) fn parse_integer_parameter(name: &str, value: &str) -> Result<usize, AlgorithmError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("expected a non-negative integer, got {value:?} ({e})"),
        })
}
