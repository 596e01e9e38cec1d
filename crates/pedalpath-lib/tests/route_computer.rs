mod common;

use std::sync::Arc;
use std::thread;

use pedalpath_lib::{
    AdjacencyGraph, EdgeId, Error, Graph, NodeId, Point, RouteComputer, SingleRoute, UniformCost,
};

use common::{assert_close, brute_force_cost, grid_graph, line_graph, random_graph, route_cost};

fn assert_contiguous(route: &SingleRoute, start: NodeId, end: NodeId) {
    assert_eq!(route.start_node(), start);
    assert_eq!(route.end_node(), end);
    for pair in route.edges().windows(2) {
        assert_eq!(pair[0].to_node(), pair[1].from_node());
    }
}

#[test]
fn uniform_cost_matches_brute_force_on_random_graphs() {
    common::init_tracing();
    for seed in 1..=12 {
        let graph = random_graph(seed, 9, 24);
        let computer = RouteComputer::new(&graph, UniformCost);
        for start in 0..graph.node_count() {
            for end in 0..graph.node_count() {
                if start == end {
                    continue;
                }
                let expected = brute_force_cost(&graph, &UniformCost, start, end);
                let route = computer
                    .best_route_between(start, end)
                    .expect("valid endpoints");
                match (route, expected) {
                    (Some(route), Some(cost)) => {
                        assert_contiguous(&route, start, end);
                        assert_close(route_cost(route.edges(), &UniformCost), cost);
                        assert_close(route.length(), cost);
                    }
                    (None, None) => {}
                    (route, expected) => panic!(
                        "seed {seed}, {start} -> {end}: search found {:?}, reference {expected:?}",
                        route.map(|r| r.length())
                    ),
                }
            }
        }
    }
}

#[test]
fn weighted_cost_matches_brute_force_on_random_graphs() {
    let cost = |node: NodeId, edge: EdgeId| 1.0 + ((node * 7 + edge * 3) % 5) as f64 * 0.5;
    for seed in 20..=28 {
        let graph = random_graph(seed, 8, 20);
        let computer = RouteComputer::new(&graph, cost);
        for start in 0..graph.node_count() {
            for end in 0..graph.node_count() {
                if start == end {
                    continue;
                }
                let expected = brute_force_cost(&graph, &cost, start, end);
                let route = computer.best_route_between(start, end).unwrap();
                assert_eq!(route.is_some(), expected.is_some(), "seed {seed}, {start} -> {end}");
                if let (Some(route), Some(expected)) = (route, expected) {
                    assert_contiguous(&route, start, end);
                    assert_close(route_cost(route.edges(), &cost), expected);
                }
            }
        }
    }
}

#[test]
fn impassable_edges_are_avoided() {
    // Square 0-1-3 / 0-2-3 with the short side blocked at 0 -> 1.
    let mut builder = AdjacencyGraph::builder();
    let a = builder.add_node(Point::new(0.0, 0.0));
    let b = builder.add_node(Point::new(10.0, 0.0));
    let c = builder.add_node(Point::new(0.0, 20.0));
    let d = builder.add_node(Point::new(10.0, 20.0));
    let blocked = builder.add_edge(a, b, 10.0).unwrap();
    builder.add_edge(b, d, 20.0).unwrap();
    builder.add_edge(a, c, 20.0).unwrap();
    builder.add_edge(c, d, 10.0).unwrap();
    let graph = builder.build();

    let cost = move |_node: NodeId, edge: EdgeId| {
        if edge == blocked {
            f64::INFINITY
        } else {
            1.0
        }
    };
    let route = RouteComputer::new(&graph, cost)
        .best_route_between(a, d)
        .unwrap()
        .expect("detour exists");
    let nodes: Vec<_> = route.edges().iter().map(|e| e.to_node()).collect();
    assert_eq!(nodes, vec![c, d]);
    assert_eq!(route.length(), 30.0);
}

#[test]
fn one_way_streets_make_legs_unreachable() {
    let mut builder = AdjacencyGraph::builder();
    let nodes: Vec<_> = (0..3)
        .map(|i| builder.add_node(Point::new(i as f64 * 50.0, 0.0)))
        .collect();
    builder.add_straight_edge(nodes[0], nodes[1]).unwrap();
    builder.add_straight_edge(nodes[1], nodes[2]).unwrap();
    let graph = builder.build();
    let computer = RouteComputer::new(&graph, UniformCost);

    assert!(computer.best_route_between(0, 2).unwrap().is_some());
    assert!(computer.best_route_between(2, 0).unwrap().is_none());
}

#[test]
fn identical_or_unknown_endpoints_are_rejected() {
    let graph = line_graph(3, 10.0);
    let computer = RouteComputer::new(&graph, UniformCost);

    assert!(matches!(
        computer.best_route_between(1, 1),
        Err(Error::IdenticalEndpoints { node: 1 })
    ));
    assert!(matches!(
        computer.best_route_between(0, 3),
        Err(Error::NodeOutOfRange {
            node: 3,
            node_count: 3
        })
    ));
}

#[test]
fn grid_route_has_manhattan_length() {
    let graph = grid_graph(6, 4, 25.0);
    let computer = RouteComputer::new(&graph, UniformCost);
    let start = 0;
    let end = 3 * 6 + 5;
    let route = computer.best_route_between(start, end).unwrap().unwrap();
    assert_contiguous(&route, start, end);
    assert_close(route.length(), (5.0 + 3.0) * 25.0);
    assert_eq!(route.edges().len(), 8);
}

#[test]
fn route_through_node_zero_is_complete() {
    // 1 - 0 - 2: the only way from 1 to 2 passes through node 0.
    let mut builder = AdjacencyGraph::builder();
    let hub = builder.add_node(Point::new(0.0, 0.0));
    let west = builder.add_node(Point::new(-40.0, 0.0));
    let east = builder.add_node(Point::new(60.0, 0.0));
    builder.add_two_way(west, hub).unwrap();
    builder.add_two_way(hub, east).unwrap();
    let graph = builder.build();

    let route = RouteComputer::new(&graph, UniformCost)
        .best_route_between(west, east)
        .unwrap()
        .unwrap();
    assert_contiguous(&route, west, east);
    assert_eq!(route.edges().len(), 2);
    assert_eq!(route.length(), 100.0);
}

#[test]
fn shared_graph_serves_concurrent_searches() {
    let graph = Arc::new(grid_graph(8, 8, 10.0));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                let computer = RouteComputer::new(graph, UniformCost);
                let end = 63 - worker;
                computer
                    .best_route_between(0, end)
                    .expect("valid endpoints")
                    .map(|route| route.length())
            })
        })
        .collect();

    let lengths: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker finished"))
        .collect();
    assert_eq!(
        lengths,
        vec![Some(140.0), Some(130.0), Some(120.0), Some(110.0)]
    );
}
