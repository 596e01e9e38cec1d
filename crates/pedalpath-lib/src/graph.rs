//! Road-network graph and cost model seen by the route computer.
//!
//! The [`Graph`] trait is the read-only topology provider the search runs
//! against; [`CostFunction`] is the pluggable traversal policy. The graph is
//! populated outside this crate. [`AdjacencyGraph`] is an in-memory
//! implementation for embedding applications that already hold their network
//! in memory, and for tests.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::geometry::{self, Point};
use crate::spatial::NodeIndex;

/// Dense node identifier in `[0, node_count)`.
pub type NodeId = usize;

/// Dense edge identifier.
pub type EdgeId = usize;

/// Read-only directed graph with node positions.
pub trait Graph {
    /// Number of nodes; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Number of edges leaving `node`.
    fn node_out_degree(&self, node: NodeId) -> usize;

    /// Identifier of the `index`-th edge leaving `node`.
    fn node_out_edge_id(&self, node: NodeId, index: usize) -> EdgeId;

    /// Node the edge points to.
    fn edge_target_node_id(&self, edge: EdgeId) -> NodeId;

    /// Physical length of the edge in metres (finite, non-negative).
    fn edge_length(&self, edge: EdgeId) -> f64;

    /// Position of the node.
    fn node_point(&self, node: NodeId) -> Point;

    /// Closest node within `search_radius` metres of `point`.
    fn node_closest_to(&self, point: Point, search_radius: f64) -> Option<NodeId>;
}

/// Multiplicative traversal cost applied to an edge's length.
///
/// Factors must be non-negative. A factor that makes the edge's contribution
/// non-finite (typically `f64::INFINITY`) marks the edge impassable.
pub trait CostFunction {
    /// Cost factor for leaving `node` through `edge`.
    fn cost_factor(&self, node: NodeId, edge: EdgeId) -> f64;
}

/// Every edge costs exactly its length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformCost;

impl CostFunction for UniformCost {
    fn cost_factor(&self, _node: NodeId, _edge: EdgeId) -> f64 {
        1.0
    }
}

impl CostFunction for &UniformCost {
    fn cost_factor(&self, _node: NodeId, _edge: EdgeId) -> f64 {
        1.0
    }
}

/// Closures are cost functions, and so are references to them.
impl<F> CostFunction for F
where
    F: Fn(NodeId, EdgeId) -> f64,
{
    fn cost_factor(&self, node: NodeId, edge: EdgeId) -> f64 {
        self(node, edge)
    }
}

/// Cost function shared between several computers through an [`Arc`].
///
/// A blanket impl for `Arc<C>` or `&C` would overlap with the closure impl,
/// so shared policies go through this wrapper instead.
#[derive(Debug)]
pub struct SharedCost<C: ?Sized>(pub Arc<C>);

impl<C> SharedCost<C> {
    pub fn new(cost_function: C) -> Self {
        Self(Arc::new(cost_function))
    }
}

impl<C: ?Sized> Clone for SharedCost<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C: ?Sized> From<Arc<C>> for SharedCost<C> {
    fn from(cost_function: Arc<C>) -> Self {
        Self(cost_function)
    }
}

impl<C: CostFunction + ?Sized> CostFunction for SharedCost<C> {
    fn cost_factor(&self, node: NodeId, edge: EdgeId) -> f64 {
        self.0.cost_factor(node, edge)
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn node_out_degree(&self, node: NodeId) -> usize {
        (**self).node_out_degree(node)
    }

    fn node_out_edge_id(&self, node: NodeId, index: usize) -> EdgeId {
        (**self).node_out_edge_id(node, index)
    }

    fn edge_target_node_id(&self, edge: EdgeId) -> NodeId {
        (**self).edge_target_node_id(edge)
    }

    fn edge_length(&self, edge: EdgeId) -> f64 {
        (**self).edge_length(edge)
    }

    fn node_point(&self, node: NodeId) -> Point {
        (**self).node_point(node)
    }

    fn node_closest_to(&self, point: Point, search_radius: f64) -> Option<NodeId> {
        (**self).node_closest_to(point, search_radius)
    }
}

impl<G: Graph + ?Sized> Graph for Arc<G> {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn node_out_degree(&self, node: NodeId) -> usize {
        (**self).node_out_degree(node)
    }

    fn node_out_edge_id(&self, node: NodeId, index: usize) -> EdgeId {
        (**self).node_out_edge_id(node, index)
    }

    fn edge_target_node_id(&self, edge: EdgeId) -> NodeId {
        (**self).edge_target_node_id(edge)
    }

    fn edge_length(&self, edge: EdgeId) -> f64 {
        (**self).edge_length(edge)
    }

    fn node_point(&self, node: NodeId) -> Point {
        (**self).node_point(node)
    }

    fn node_closest_to(&self, point: Point, search_radius: f64) -> Option<NodeId> {
        (**self).node_closest_to(point, search_radius)
    }
}

/// Directed edge record inside an [`AdjacencyGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeRecord {
    target: NodeId,
    length: f64,
}

/// In-memory graph with compressed adjacency and a KD-tree for node lookup.
///
/// Outgoing edges of a node are enumerated in insertion order.
#[derive(Debug)]
pub struct AdjacencyGraph {
    positions: Vec<Point>,
    /// `out_offsets[n]..out_offsets[n + 1]` indexes `out_edges` for node `n`.
    out_offsets: Vec<usize>,
    out_edges: Vec<EdgeId>,
    edges: Vec<EdgeRecord>,
    index: NodeIndex,
}

impl AdjacencyGraph {
    /// Start building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edge ids of `node`, in enumeration order.
    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.out_edges[self.out_offsets[node]..self.out_offsets[node + 1]]
    }
}

impl Graph for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.positions.len()
    }

    fn node_out_degree(&self, node: NodeId) -> usize {
        self.out_offsets[node + 1] - self.out_offsets[node]
    }

    fn node_out_edge_id(&self, node: NodeId, index: usize) -> EdgeId {
        self.out_edges(node)[index]
    }

    fn edge_target_node_id(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].target
    }

    fn edge_length(&self, edge: EdgeId) -> f64 {
        self.edges[edge].length
    }

    fn node_point(&self, node: NodeId) -> Point {
        self.positions[node]
    }

    fn node_closest_to(&self, point: Point, search_radius: f64) -> Option<NodeId> {
        self.index.nearest_within(point, search_radius)
    }
}

/// Incremental builder for [`AdjacencyGraph`].
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    positions: Vec<Point>,
    /// `(source, record)` in insertion order; the position is the edge id.
    edges: Vec<(NodeId, EdgeRecord)>,
}

impl GraphBuilder {
    /// Add a node and return its id.
    pub fn add_node(&mut self, point: Point) -> NodeId {
        self.positions.push(point);
        self.positions.len() - 1
    }

    /// Add a directed edge with an explicit length and return its id.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: f64) -> Result<EdgeId> {
        self.check_node(from)?;
        self.check_node(to)?;
        let edge = self.edges.len();
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidEdgeLength { edge, length });
        }
        self.edges.push((
            from,
            EdgeRecord {
                target: to,
                length,
            },
        ));
        Ok(edge)
    }

    /// Add a directed edge whose length is the straight-line distance between its nodes.
    pub fn add_straight_edge(&mut self, from: NodeId, to: NodeId) -> Result<EdgeId> {
        self.check_node(from)?;
        self.check_node(to)?;
        let length = geometry::distance(self.positions[from], self.positions[to]);
        self.add_edge(from, to, length)
    }

    /// Add a straight edge in both directions, returning `(forward, backward)` ids.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId) -> Result<(EdgeId, EdgeId)> {
        let forward = self.add_straight_edge(a, b)?;
        let backward = self.add_straight_edge(b, a)?;
        Ok((forward, backward))
    }

    /// Freeze the builder into a graph.
    pub fn build(self) -> AdjacencyGraph {
        let node_count = self.positions.len();
        let mut out_offsets = vec![0usize; node_count + 1];
        for (source, _) in &self.edges {
            out_offsets[source + 1] += 1;
        }
        for node in 0..node_count {
            out_offsets[node + 1] += out_offsets[node];
        }

        let mut cursor = out_offsets.clone();
        let mut out_edges = vec![0; self.edges.len()];
        for (edge, (source, _)) in self.edges.iter().enumerate() {
            out_edges[cursor[*source]] = edge;
            cursor[*source] += 1;
        }

        let index = NodeIndex::build(&self.positions);

        AdjacencyGraph {
            positions: self.positions,
            out_offsets,
            out_edges,
            edges: self.edges.into_iter().map(|(_, record)| record).collect(),
            index,
        }
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.positions.len() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node,
                node_count: self.positions.len(),
            })
        }
    }
}
