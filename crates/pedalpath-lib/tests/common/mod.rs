//! Common test utilities and fixture graphs.
//!
//! Integration tests build small in-memory road networks here instead of
//! loading real map data: straight lines, square grids and pseudo-random
//! sparse graphs with a brute-force reference for their shortest paths.

use std::cell::Cell;
use std::rc::Rc;

use pedalpath_lib::{AdjacencyGraph, CostFunction, Edge, EdgeId, Graph, NodeId, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Install a test-friendly tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `count` nodes on the x axis, `spacing` metres apart, linked both ways.
#[allow(dead_code)]
pub fn line_graph(count: usize, spacing: f64) -> AdjacencyGraph {
    let mut builder = AdjacencyGraph::builder();
    let nodes: Vec<_> = (0..count)
        .map(|i| builder.add_node(Point::new(i as f64 * spacing, 0.0)))
        .collect();
    for pair in nodes.windows(2) {
        builder.add_two_way(pair[0], pair[1]).expect("valid line edge");
    }
    builder.build()
}

/// `cols` x `rows` grid, `spacing` metres apart, linked both ways.
///
/// Node `(col, row)` has id `row * cols + col`.
#[allow(dead_code)]
pub fn grid_graph(cols: usize, rows: usize, spacing: f64) -> AdjacencyGraph {
    let mut builder = AdjacencyGraph::builder();
    for row in 0..rows {
        for col in 0..cols {
            builder.add_node(Point::new(col as f64 * spacing, row as f64 * spacing));
        }
    }
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col;
            if col + 1 < cols {
                builder.add_two_way(id, id + 1).expect("valid grid edge");
            }
            if row + 1 < rows {
                builder.add_two_way(id, id + cols).expect("valid grid edge");
            }
        }
    }
    builder.build()
}

/// Sparse directed graph without self-loops or parallel edges.
///
/// Edge lengths are whole metres in `[1, 100]` and unrelated to node positions.
#[allow(dead_code)]
pub fn random_graph(seed: u64, nodes: usize, edges: usize) -> AdjacencyGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = AdjacencyGraph::builder();
    for _ in 0..nodes {
        let x = rng.gen_range(0.0..1_000.0);
        let y = rng.gen_range(0.0..1_000.0);
        builder.add_node(Point::new(x, y));
    }

    let mut seen = std::collections::HashSet::new();
    let mut attempts = 0;
    while seen.len() < edges && attempts < edges * 20 {
        attempts += 1;
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        if from == to || !seen.insert((from, to)) {
            continue;
        }
        let length = rng.gen_range(1..=100) as f64;
        builder.add_edge(from, to, length).expect("valid random edge");
    }
    builder.build()
}

/// Lowest cost from `start` to `end` by Bellman-Ford relaxation.
#[allow(dead_code)]
pub fn brute_force_cost<G: Graph, C: CostFunction>(
    graph: &G,
    cost: &C,
    start: NodeId,
    end: NodeId,
) -> Option<f64> {
    let n = graph.node_count();
    let mut best = vec![f64::INFINITY; n];
    best[start] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for node in 0..n {
            if !best[node].is_finite() {
                continue;
            }
            for i in 0..graph.node_out_degree(node) {
                let edge = graph.node_out_edge_id(node, i);
                let step = cost.cost_factor(node, edge) * graph.edge_length(edge);
                if !step.is_finite() || step < 0.0 {
                    continue;
                }
                let target = graph.edge_target_node_id(edge);
                if best[node] + step < best[target] {
                    best[target] = best[node] + step;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    best[end].is_finite().then_some(best[end])
}

/// Total cost of travelling `edges` under `cost`.
#[allow(dead_code)]
pub fn route_cost<'a, C: CostFunction>(edges: impl IntoIterator<Item = &'a Edge>, cost: &C) -> f64 {
    edges
        .into_iter()
        .map(|edge| cost.cost_factor(edge.from_node(), edge.edge_id()) * edge.length())
        .sum()
}

/// Uniform cost that counts how often the search asks for a factor.
#[allow(dead_code)]
pub fn counting_cost() -> (Rc<Cell<usize>>, impl Fn(NodeId, EdgeId) -> f64) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let cost = move |_node: NodeId, _edge: EdgeId| {
        counter.set(counter.get() + 1);
        1.0
    };
    (calls, cost)
}

/// Assert two floats agree to within a millimetre.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
