//! Whole-graph algorithms: spanning trees and network flow
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod mst;

pub use self::max_flow::{EdgeFlow, FlowStatistics, MaxFlowEngine, MaxFlowResult};
pub use self::mst::{MSTEdge, MSTResult, MSTStatistics, MinimumSpanningTreeEngine, UnionFind};
