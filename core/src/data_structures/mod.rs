//! Graph storage and the indexed priority queue shared by the engines

pub mod graph;
pub mod priority_queue;

pub use self::graph::{Graph, GraphKind, ResidualEdge, Weight, WeightedEdge};
pub use self::priority_queue::{HeapStats, IndexedMinHeap};
