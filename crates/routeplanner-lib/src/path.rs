//! Single-source shortest paths over a [`Graph`].
//!
//! [`ShortestPathEngine`] keeps its per-node scratch state (best distance and
//! predecessor) in dense tables that are reset at the start of every run, so
//! one engine can be reused across any number of independent searches.

use std::hash::Hash;

use tracing::debug;

use crate::frontier::PriorityFrontier;
use crate::graph::{Edge, Graph, NodeIndex, TravelMode};
use crate::mask::MaskSet;

/// Ordered node sequence from a search source to a target plus its total
/// weight. An empty sequence means the target was unreachable; `weight` is
/// meaningless in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub nodes: Vec<NodeIndex>,
    pub weight: f64,
}

impl PathResult {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Nodes strictly between the first and the last one.
    pub fn intermediates(&self) -> &[NodeIndex] {
        if self.nodes.len() <= 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }

    /// Append a path that starts where this one ends. The shared node is kept
    /// once and the weights are summed. Joining with an empty path yields an
    /// empty path.
    pub fn join(mut self, next: PathResult) -> PathResult {
        if self.is_empty() || next.is_empty() {
            return PathResult::empty();
        }
        debug_assert_eq!(self.nodes.last(), next.nodes.first());
        self.nodes.extend_from_slice(&next.nodes[1..]);
        self.weight += next.weight;
        self
    }

    /// The same path walked from its end back to its start.
    pub fn reversed(mut self) -> PathResult {
        self.nodes.reverse();
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Predecessor {
    origin: NodeIndex,
    weight: f64,
}

/// Reusable Dijkstra engine.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathEngine {
    distances: Vec<f64>,
    predecessors: Vec<Option<Predecessor>>,
    frontier: PriorityFrontier,
    source: Option<NodeIndex>,
    mode: Option<TravelMode>,
}

impl ShortestPathEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run Dijkstra from `source` under `mode`, honouring `mask`.
    ///
    /// A blocked node can still be reached (and settled) but its outgoing
    /// edges are never expanded. Blocked edges are never relaxed. Returns the
    /// number of nodes settled with a finite distance.
    pub fn run<K>(
        &mut self,
        graph: &Graph<K>,
        source: NodeIndex,
        mode: TravelMode,
        mask: &MaskSet,
    ) -> usize
    where
        K: Eq + Hash + Clone,
    {
        self.reset(graph.index_bound());
        self.mode = Some(mode);
        if !graph.contains(source) {
            debug!(source, "shortest path source is not in the graph");
            return 0;
        }
        self.source = Some(source);
        self.distances[source] = 0.0;

        for node in graph.nodes() {
            self.frontier.insert(node, self.distances[node]);
        }

        let mut settled = 0usize;
        while let Some(current) = self.frontier.extract_min() {
            if self.distances[current].is_infinite() {
                // everything left in the frontier is unreachable
                continue;
            }
            settled += 1;
            if mask.is_node_blocked(current) {
                continue;
            }
            for edge in graph.neighbours(current) {
                if mask.is_edge_blocked(edge.origin, edge.target) {
                    continue;
                }
                if self.relax(edge, mode) {
                    self.frontier
                        .decrease_key(edge.target, self.distances[edge.target]);
                }
            }
        }

        debug!(source, %mode, settled, "shortest path run complete");
        settled
    }

    /// Try to improve the distance of `edge.target` through `edge`.
    fn relax(&mut self, edge: &Edge, mode: TravelMode) -> bool {
        let Some(weight) = edge.weights.for_mode(mode) else {
            return false;
        };
        let candidate = self.distances[edge.origin] + weight;
        if self.distances[edge.target] > candidate {
            self.distances[edge.target] = candidate;
            self.predecessors[edge.target] = Some(Predecessor {
                origin: edge.origin,
                weight,
            });
            return true;
        }
        false
    }

    fn reset(&mut self, bound: usize) {
        self.distances.clear();
        self.distances.resize(bound, f64::INFINITY);
        self.predecessors.clear();
        self.predecessors.resize(bound, None);
        self.frontier.clear();
        self.source = None;
        self.mode = None;
    }

    /// Source of the most recent run.
    pub fn source(&self) -> Option<NodeIndex> {
        self.source
    }

    /// Travel mode of the most recent run.
    pub fn mode(&self) -> Option<TravelMode> {
        self.mode
    }

    /// Best known distance to `node` after the last run.
    pub fn distance(&self, node: NodeIndex) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Rebuild the path from the last run's source to `target`.
    pub fn path_to(&self, target: NodeIndex) -> PathResult {
        let Some(source) = self.source else {
            return PathResult::empty();
        };
        if target == source {
            return PathResult {
                nodes: vec![source],
                weight: 0.0,
            };
        }
        if self.predecessors.get(target).copied().flatten().is_none() {
            return PathResult::empty();
        }

        let mut nodes = vec![target];
        let mut weight = 0.0;
        let mut current = target;
        while current != source {
            let Some(step) = self.predecessors[current] else {
                return PathResult::empty();
            };
            weight += step.weight;
            current = step.origin;
            nodes.push(current);
        }
        nodes.reverse();
        PathResult { nodes, weight }
    }
}

/// Convenience wrapper running a fresh engine for a single source/target pair.
pub fn shortest_path<K>(
    graph: &Graph<K>,
    source: NodeIndex,
    target: NodeIndex,
    mode: TravelMode,
    mask: &MaskSet,
) -> PathResult
where
    K: Eq + Hash + Clone,
{
    let mut engine = ShortestPathEngine::new();
    engine.run(graph, source, mode, mask);
    engine.path_to(target)
}
