//! Arena-backed directed graph used by the shortest-path engine.
//!
//! Nodes live in a slot vector addressed by a stable [`NodeIndex`]; removing a
//! node empties its slot instead of shifting the others, so indices handed out
//! earlier stay valid for every node that still exists. Each node owns its
//! outgoing [`Edge`] records. Edges refer to their endpoints by index only.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Stable position of a node inside a [`Graph`].
pub type NodeIndex = usize;

/// Weight selector used by searches over the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Driving,
    Walking,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        };
        f.write_str(value)
    }
}

/// Travel times attached to a single directed edge.
///
/// `driving` is `None` when the segment cannot be driven at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWeights {
    pub walking: f64,
    pub driving: Option<f64>,
}

impl EdgeWeights {
    pub fn new(walking: f64, driving: Option<f64>) -> Self {
        debug_assert!(walking >= 0.0, "walking time must be non-negative");
        debug_assert!(
            driving.map_or(true, |d| d >= 0.0),
            "driving time must be non-negative"
        );
        Self { walking, driving }
    }

    /// Weight of the edge under `mode`, or `None` when the edge is unusable.
    pub fn for_mode(&self, mode: TravelMode) -> Option<f64> {
        match mode {
            TravelMode::Driving => self.driving,
            TravelMode::Walking => Some(self.walking),
        }
    }
}

/// Directed edge within the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub origin: NodeIndex,
    pub target: NodeIndex,
    pub weights: EdgeWeights,
    /// Set when the edge was created together with a mirror edge running the
    /// other way. Cleared on the survivor when its mirror is removed.
    pub bidirectional: bool,
}

#[derive(Debug, Clone)]
struct NodeSlot<K> {
    key: K,
    edges: Vec<Edge>,
}

/// Directed weighted graph keyed by an opaque node identifier.
#[derive(Debug, Clone)]
pub struct Graph<K> {
    slots: Vec<Option<NodeSlot<K>>>,
    index: HashMap<K, NodeIndex>,
    edge_count: usize,
}

impl<K> Default for Graph<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<K> Graph<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Returns `false` without touching the graph when the key
    /// is already present.
    pub fn add_node(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let idx = self.slots.len();
        self.slots.push(Some(NodeSlot {
            key: key.clone(),
            edges: Vec::new(),
        }));
        self.index.insert(key, idx);
        true
    }

    /// Add a single directed edge. Fails when either endpoint is absent.
    pub fn add_directed_edge(&mut self, origin: &K, target: &K, weights: EdgeWeights) -> bool {
        let (Some(from), Some(to)) = (self.find(origin), self.find(target)) else {
            return false;
        };
        self.push_edge(from, to, weights, false);
        true
    }

    /// Add a pair of mirrored edges between `a` and `b` sharing the same
    /// weights. Both endpoints are resolved before anything is created, so
    /// the graph is never left with only one half of the pair.
    pub fn add_bidirectional_edge(&mut self, a: &K, b: &K, weights: EdgeWeights) -> bool {
        let (Some(from), Some(to)) = (self.find(a), self.find(b)) else {
            return false;
        };
        self.push_edge(from, to, weights, true);
        self.push_edge(to, from, weights, true);
        true
    }

    fn push_edge(&mut self, origin: NodeIndex, target: NodeIndex, weights: EdgeWeights, bidi: bool) {
        if let Some(Some(slot)) = self.slots.get_mut(origin) {
            slot.edges.push(Edge {
                origin,
                target,
                weights,
                bidirectional: bidi,
            });
            self.edge_count += 1;
        }
    }

    /// Remove a node together with every edge leaving or entering it.
    pub fn remove_node(&mut self, key: &K) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        if let Some(slot) = self.slots[idx].take() {
            self.edge_count -= slot.edges.len();
        }
        let mut dropped = 0;
        for slot in self.slots.iter_mut().flatten() {
            let before = slot.edges.len();
            slot.edges.retain(|edge| edge.target != idx);
            dropped += before - slot.edges.len();
        }
        self.edge_count -= dropped;
        true
    }

    /// Remove every directed edge from `origin` to `target`.
    ///
    /// The mirror edge (if any) stays in place but is no longer flagged as
    /// bidirectional.
    pub fn remove_edge(&mut self, origin: &K, target: &K) -> bool {
        let (Some(from), Some(to)) = (self.find(origin), self.find(target)) else {
            return false;
        };
        let Some(Some(slot)) = self.slots.get_mut(from) else {
            return false;
        };
        let before = slot.edges.len();
        slot.edges.retain(|edge| edge.target != to);
        let removed = before - slot.edges.len();
        if removed == 0 {
            return false;
        }
        self.edge_count -= removed;

        if let Some(Some(mirror)) = self.slots.get_mut(to) {
            for edge in mirror.edges.iter_mut().filter(|e| e.target == from) {
                edge.bidirectional = false;
            }
        }
        true
    }

    /// Index of the node identified by `key`.
    pub fn find(&self, key: &K) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Key stored for `node`, if the node still exists.
    pub fn key(&self, node: NodeIndex) -> Option<&K> {
        self.slot(node).map(|slot| &slot.key)
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.slot(node).is_some()
    }

    /// Indices of every live node, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|_| idx))
    }

    /// Outgoing edges of `node`. Empty for unknown nodes.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.slot(node)
            .map(|slot| slot.edges.as_slice())
            .unwrap_or(&[])
    }

    /// First directed edge from `origin` to `target`.
    pub fn edge(&self, origin: NodeIndex, target: NodeIndex) -> Option<&Edge> {
        self.neighbours(origin).iter().find(|e| e.target == target)
    }

    /// Mirror of a bidirectional edge.
    pub fn reverse(&self, edge: &Edge) -> Option<&Edge> {
        if !edge.bidirectional {
            return None;
        }
        self.neighbours(edge.target)
            .iter()
            .find(|e| e.target == edge.origin && e.bidirectional)
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) of every index handed out so far.
    pub fn index_bound(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, node: NodeIndex) -> Option<&NodeSlot<K>> {
        self.slots.get(node).and_then(Option::as_ref)
    }
}
