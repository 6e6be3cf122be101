//! Request-scoped exclusion sets consulted by the shortest-path engine.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use crate::graph::NodeIndex;

/// Blocked nodes and blocked directed edges for a single query.
///
/// A mask never touches the graph it is applied to; the engine consults it
/// while expanding nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSet {
    nodes: HashSet<NodeIndex>,
    edges: HashSet<(NodeIndex, NodeIndex)>,
}

impl MaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_node(&mut self, node: NodeIndex) {
        self.nodes.insert(node);
    }

    /// Block the directed edge(s) running from `origin` to `target`. The
    /// opposite direction stays usable unless it is blocked as well.
    pub fn block_edge(&mut self, origin: NodeIndex, target: NodeIndex) {
        self.edges.insert((origin, target));
    }

    pub fn is_node_blocked(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    pub fn is_edge_blocked(&self, origin: NodeIndex, target: NodeIndex) -> bool {
        self.edges.contains(&(origin, target))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn blocked_node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn blocked_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Borrow the mask for the duration of one query. The returned guard
    /// clears the mask when dropped, whichever way the query exits.
    pub fn scoped(&mut self) -> ScopedMask<'_> {
        ScopedMask { mask: self }
    }
}

/// Guard returned by [`MaskSet::scoped`].
#[derive(Debug)]
pub struct ScopedMask<'a> {
    mask: &'a mut MaskSet,
}

impl Deref for ScopedMask<'_> {
    type Target = MaskSet;

    fn deref(&self) -> &MaskSet {
        self.mask
    }
}

impl DerefMut for ScopedMask<'_> {
    fn deref_mut(&mut self) -> &mut MaskSet {
        self.mask
    }
}

impl Drop for ScopedMask<'_> {
    fn drop(&mut self) {
        self.mask.clear();
    }
}
