//! Addressable binary min-heap used as the Dijkstra frontier.
//!
//! Unlike `std::collections::BinaryHeap`, the frontier remembers where every
//! node currently sits so that [`PriorityFrontier::decrease_key`] can move an
//! entry up in `O(log n)` instead of pushing a duplicate. The heap array is
//! 1-indexed (slot 0 is a placeholder) which keeps the parent/child
//! arithmetic at `i / 2`, `2i` and `2i + 1`.

use crate::graph::NodeIndex;

/// Position value meaning "not currently in the heap".
const ABSENT: usize = 0;

#[derive(Debug, Clone)]
pub struct PriorityFrontier {
    heap: Vec<NodeIndex>,
    positions: Vec<usize>,
    keys: Vec<f64>,
}

impl Default for PriorityFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self {
            heap: vec![NodeIndex::MAX],
            positions: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Pre-size the position and key tables for node indices below `bound`.
    pub fn with_capacity(bound: usize) -> Self {
        let mut frontier = Self::new();
        frontier.heap.reserve(bound);
        frontier.positions = vec![ABSENT; bound];
        frontier.keys = vec![f64::INFINITY; bound];
        frontier
    }

    pub fn is_empty(&self) -> bool {
        self.heap.len() == 1
    }

    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.positions.get(node).is_some_and(|&pos| pos != ABSENT)
    }

    /// Current priority of `node`, if it is queued.
    pub fn key(&self, node: NodeIndex) -> Option<f64> {
        self.contains(node).then(|| self.keys[node])
    }

    /// Drop every entry while keeping the allocated tables.
    pub fn clear(&mut self) {
        for &node in &self.heap[1..] {
            self.positions[node] = ABSENT;
        }
        self.heap.truncate(1);
    }

    pub fn insert(&mut self, node: NodeIndex, key: f64) {
        debug_assert!(!self.contains(node), "node {node} inserted twice");
        if node >= self.positions.len() {
            self.positions.resize(node + 1, ABSENT);
            self.keys.resize(node + 1, f64::INFINITY);
        }
        self.keys[node] = key;
        self.heap.push(node);
        let last = self.heap.len() - 1;
        self.sift_up(last);
    }

    /// Remove and return the node with the smallest key.
    pub fn extract_min(&mut self) -> Option<NodeIndex> {
        if self.is_empty() {
            return None;
        }
        let min = self.heap[1];
        let last = self.heap.pop()?;
        if !self.is_empty() {
            self.set(1, last);
            self.sift_down(1);
        }
        self.positions[min] = ABSENT;
        Some(min)
    }

    /// Lower the key of a queued node and restore heap order.
    ///
    /// The node must already be queued and `key` must not exceed its current
    /// key.
    pub fn decrease_key(&mut self, node: NodeIndex, key: f64) {
        debug_assert!(self.contains(node), "decrease_key on unqueued node {node}");
        let Some(&pos) = self.positions.get(node) else {
            return;
        };
        if pos == ABSENT {
            return;
        }
        debug_assert!(key <= self.keys[node], "decrease_key raised key of {node}");
        self.keys[node] = key;
        self.sift_up(pos);
    }

    fn less(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.keys[a].total_cmp(&self.keys[b]).is_lt()
    }

    fn sift_up(&mut self, mut i: usize) {
        let node = self.heap[i];
        while i > 1 && self.less(node, self.heap[i / 2]) {
            let parent = self.heap[i / 2];
            self.set(i, parent);
            i /= 2;
        }
        self.set(i, node);
    }

    fn sift_down(&mut self, mut i: usize) {
        let node = self.heap[i];
        loop {
            let mut child = i * 2;
            if child >= self.heap.len() {
                break;
            }
            if child + 1 < self.heap.len() && self.less(self.heap[child + 1], self.heap[child]) {
                child += 1;
            }
            if !self.less(self.heap[child], node) {
                break;
            }
            let moved = self.heap[child];
            self.set(i, moved);
            i = child;
        }
        self.set(i, node);
    }

    fn set(&mut self, i: usize, node: NodeIndex) {
        self.heap[i] = node;
        self.positions[node] = i;
    }
}
