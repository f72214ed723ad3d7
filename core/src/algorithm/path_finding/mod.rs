//! Pathfinding algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dijkstra;

pub use self::dijkstra::{DijkstraStatistics, ShortestPathEngine, UNREACHABLE};
