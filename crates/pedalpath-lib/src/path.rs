//! Single-pair lowest-cost search over a [`Graph`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::graph::{CostFunction, Graph, NodeId};
use crate::route::SingleRoute;

/// Computes lowest-cost routes between graph nodes.
///
/// The search is Dijkstra's algorithm where traversing an edge costs its
/// length multiplied by the cost function's factor. Nodes with equal tentative
/// cost are settled smallest id first, which keeps results deterministic.
#[derive(Debug, Clone)]
pub struct RouteComputer<G, C> {
    graph: G,
    cost_function: C,
}

impl<G: Graph, C: CostFunction> RouteComputer<G, C> {
    pub fn new(graph: G, cost_function: C) -> Self {
        Self {
            graph,
            cost_function,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn cost_function(&self) -> &C {
        &self.cost_function
    }

    /// Lowest-cost route from `start` to `end`.
    ///
    /// Returns `Ok(None)` when `end` cannot be reached. Fails when both ids are
    /// equal or either is not a node of the graph.
    pub fn best_route_between(&self, start: NodeId, end: NodeId) -> Result<Option<SingleRoute>> {
        if start == end {
            return Err(Error::IdenticalEndpoints { node: start });
        }
        let node_count = self.graph.node_count();
        for node in [start, end] {
            if node >= node_count {
                return Err(Error::NodeOutOfRange { node, node_count });
            }
        }

        let Some(nodes) = self.search(start, end, node_count) else {
            debug!(start, goal = end, "no route found");
            return Ok(None);
        };

        let edges = nodes
            .windows(2)
            .map(|pair| self.connecting_edge(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;
        debug!(start, goal = end, edges = edges.len(), "route found");

        SingleRoute::new(edges).map(Some)
    }

    /// Node sequence of the cheapest path, `start` and `end` included.
    fn search(&self, start: NodeId, end: NodeId, node_count: usize) -> Option<Vec<NodeId>> {
        let mut distances = vec![f64::INFINITY; node_count];
        let mut predecessors = vec![start; node_count];
        let mut frontier = BinaryHeap::new();
        let mut settled = 0usize;

        distances[start] = 0.0;
        frontier.push(QueueEntry::new(start, 0.0));

        while let Some(entry) = frontier.pop() {
            let node = entry.node;
            let distance = distances[node];
            if entry.cost.0 > distance {
                // Superseded by a cheaper entry pushed later.
                continue;
            }
            settled += 1;

            if node == end {
                debug!(start, goal = end, settled, cost = distance, "search reached goal");
                return Some(reconstruct_path(&predecessors, start, end));
            }

            for index in 0..self.graph.node_out_degree(node) {
                let edge = self.graph.node_out_edge_id(node, index);
                let contribution =
                    self.cost_function.cost_factor(node, edge) * self.graph.edge_length(edge);
                if !(contribution.is_finite() && contribution >= 0.0) {
                    continue;
                }

                let target = self.graph.edge_target_node_id(edge);
                let candidate = distance + contribution;
                if candidate < distances[target] {
                    distances[target] = candidate;
                    predecessors[target] = node;
                    frontier.push(QueueEntry::new(target, candidate));
                }
            }
        }

        debug!(start, goal = end, settled, "frontier exhausted");
        None
    }

    /// First outgoing edge of `from`, in enumeration order, that leads to `to`.
    fn connecting_edge(&self, from: NodeId, to: NodeId) -> Result<Edge> {
        let edge = (0..self.graph.node_out_degree(from))
            .map(|index| self.graph.node_out_edge_id(from, index))
            .find(|&edge| self.graph.edge_target_node_id(edge) == to);

        match edge {
            Some(edge) => Ok(Edge::of(&self.graph, edge, from, to)),
            None => {
                debug!(from, to, "graph no longer reports the relaxed edge");
                Err(Error::InconsistentGraph { from, to })
            }
        }
    }
}

/// Walk predecessors from `goal` back to `start`.
fn reconstruct_path(predecessors: &[NodeId], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = predecessors[current];
        path.push(current);
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by node id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
