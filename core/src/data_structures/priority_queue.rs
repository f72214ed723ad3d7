//! Indexed binary min-heap with decrease-key
//!
//! This module implements the priority queue shared by the shortest-path and
//! minimum-spanning-tree engines. Elements are `(id, key)` pairs where the id
//! is a dense vertex index; a reverse position table gives O(1) membership
//! and lets decrease-key find its element without a scan.
//!
//! # Complexity
//! - `insert`, `extract_min`, `decrease_key`: O(log n)
//! - `contains`, `key_of`, `peek`: O(1)
//!
//! Ties between equal keys are broken by whatever order the sifts produce.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Heap entry pairing an element identifier with its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry<K> {
    /// Element identifier
    id: NodeId,
    /// Priority value
    key: K,
}

/// Heap operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapStats {
    pub insertions: u64,
    pub extractions: u64,
    pub decrease_keys: u64,
    pub ignored_decrease_keys: u64,
}

/// Indexed binary min-heap over `(NodeId, K)` pairs
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K> {
    /// Complete binary tree in array form
    heap: Vec<HeapEntry<K>>,

    /// Reverse lookup: `position[id]` is the index of `id` in `heap`, or `None`
    /// once the element has been extracted (or was never inserted)
    position: Vec<Option<usize>>,

    stats: HeapStats,
}

impl<K: Ord + Copy> IndexedMinHeap<K> {
    /// Creates an empty heap able to hold ids in `[0, capacity)`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            position: vec![None; capacity],
            stats: HeapStats::default(),
        }
    }

    /// Number of ids this heap can index
    pub fn capacity(&self) -> usize {
        self.position.len()
    }

    /// Inserts `id` with `key`.
    ///
    /// `id` must be below [`capacity`](Self::capacity) and not already present.
    pub fn insert(&mut self, id: NodeId, key: K) {
        debug_assert!(
            self.position[id.0].is_none(),
            "vertex {id} inserted twice into the heap"
        );

        let index = self.heap.len();
        self.heap.push(HeapEntry { id, key });
        self.position[id.0] = Some(index);
        self.sift_up(index);
        self.stats.insertions += 1;
    }

    /// Removes and returns the element with the smallest key
    pub fn extract_min(&mut self) -> Option<(NodeId, K)> {
        if self.heap.is_empty() {
            return None;
        }

        let root = self.heap.swap_remove(0);
        self.position[root.id.0] = None;

        if let Some(moved) = self.heap.first() {
            self.position[moved.id.0] = Some(0);
            self.sift_down(0);
        }

        self.stats.extractions += 1;
        trace!("heap: extracted {} ({} remaining)", root.id, self.heap.len());
        Some((root.id, root.key))
    }

    /// Lowers the key of `id` to `new_key`.
    ///
    /// Returns `false` without touching the heap when `id` is absent (already
    /// extracted or never inserted) or when `new_key` would raise the key.
    pub fn decrease_key(&mut self, id: NodeId, new_key: K) -> bool {
        let Some(index) = self.position.get(id.0).copied().flatten() else {
            self.stats.ignored_decrease_keys += 1;
            return false;
        };

        if new_key > self.heap[index].key {
            self.stats.ignored_decrease_keys += 1;
            return false;
        }

        self.heap[index].key = new_key;
        self.sift_up(index);
        self.stats.decrease_keys += 1;
        true
    }

    /// Returns the minimum element without removing it
    pub fn peek(&self) -> Option<(NodeId, K)> {
        self.heap.first().map(|entry| (entry.id, entry.key))
    }

    /// Checks whether `id` is currently in the heap
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.position.get(id.0), Some(Some(_)))
    }

    /// Current key of `id`, if present
    pub fn key_of(&self, id: NodeId) -> Option<K> {
        self.position
            .get(id.0)
            .copied()
            .flatten()
            .map(|index| self.heap[index].key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    /// Verifies the heap order and the position index.
    ///
    /// Every parent key must be `<=` its children's keys, every present id
    /// must be recorded at its true index, and no absent id may claim a slot.
    pub fn validate(&self) -> Result<(), AlgorithmError> {
        let len = self.heap.len();
        for parent in 0..len {
            for child in [2 * parent + 1, 2 * parent + 2] {
                if child < len && self.heap[parent].key > self.heap[child].key {
                    return Err(AlgorithmError::HeapInvariantViolation { parent, child });
                }
            }
        }

        for (index, entry) in self.heap.iter().enumerate() {
            let recorded = self.position[entry.id.0];
            if recorded != Some(index) {
                return Err(AlgorithmError::PositionMismatch {
                    id: entry.id,
                    recorded,
                    actual: Some(index),
                });
            }
        }

        let present = self.position.iter().filter(|p| p.is_some()).count();
        if present != len {
            return Err(AlgorithmError::InvalidGraph(format!(
                "position index records {present} elements but the heap holds {len}"
            )));
        }

        Ok(())
    }

    /// Moves the entry at `index` towards the root while its parent is larger
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;

            if self.heap[parent].key <= self.heap[index].key {
                break;
            }

            self.swap_entries(index, parent);
            index = parent;
        }
    }

    /// Moves the entry at `index` towards the leaves while a child is smaller
    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();

        loop {
            let mut smallest = index;
            let left = 2 * index + 1;
            let right = 2 * index + 2;

            if left < len && self.heap[left].key < self.heap[smallest].key {
                smallest = left;
            }

            if right < len && self.heap[right].key < self.heap[smallest].key {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.swap_entries(index, smallest);
            index = smallest;
        }
    }

    /// Swaps two heap entries and records their new positions
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].id.0] = Some(a);
        self.position[self.heap[b].id.0] = Some(b);
    }
}
