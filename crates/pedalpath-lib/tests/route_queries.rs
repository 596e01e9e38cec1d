mod common;

use pedalpath_lib::{
    AdjacencyGraph, Error, Graph, MultiRoute, Point, Route, RouteComputer, RouteSummary,
    SingleRoute, UniformCost,
};

use common::{assert_close, grid_graph};

/// Grid route 0 -> 5 along the bottom row, then 5 -> 23 up the right column.
fn two_leg_route(graph: &AdjacencyGraph) -> (SingleRoute, SingleRoute, Route) {
    let computer = RouteComputer::new(graph, UniformCost);
    let first = computer.best_route_between(0, 5).unwrap().unwrap();
    let second = computer.best_route_between(5, 23).unwrap().unwrap();
    let route = MultiRoute::new(vec![first.clone().into(), second.clone().into()])
        .expect("contiguous legs")
        .into();
    (first, second, route)
}

#[test]
fn endpoints_and_clamping() {
    let graph = grid_graph(6, 4, 50.0);
    let (_, _, route) = two_leg_route(&graph);

    assert_eq!(route.length(), 250.0 + 150.0);
    assert_eq!(route.point_at(0.0), graph.node_point(0));
    assert_eq!(route.point_at(route.length()), graph.node_point(23));
    assert_eq!(route.point_at(-10.0), graph.node_point(0));
    assert_eq!(route.point_at(1e9), graph.node_point(23));
    assert_eq!(route.point_at(275.0), Point::new(250.0, 25.0));
}

#[test]
fn multi_route_combines_its_legs() {
    let graph = grid_graph(6, 4, 50.0);
    let (first, second, route) = two_leg_route(&graph);

    assert_eq!(route.length(), first.length() + second.length());
    assert_eq!(route.point_at(first.length()), second.point_at(0.0));
    assert_eq!(route.segment_count(), 2);

    // Along the bottom row x grows, then up the column y grows.
    let samples: Vec<_> = (0..=40).map(|i| route.point_at(i as f64 * 10.0)).collect();
    for pair in samples.windows(2) {
        assert!(pair[0].x() <= pair[1].x() && pair[0].y() <= pair[1].y());
        assert!(pair[0] != pair[1]);
    }
    assert_eq!(route.start_node(), 0);
    assert_eq!(route.end_node(), 23);
    assert_eq!(route.index_of_segment_at(100.0), 0);
    assert_eq!(route.index_of_segment_at(first.length()), 1);
    assert_eq!(route.index_of_segment_at(route.length()), 1);

    let points: Vec<_> = route.points().collect();
    assert_eq!(points.len(), first.points().count() + second.points().count() - 1);
    assert_eq!(points.first(), Some(&graph.node_point(0)));
    assert_eq!(points.last(), Some(&graph.node_point(23)));

    let summary = RouteSummary::from_route(&route);
    assert_eq!(summary.nodes, vec![0, 1, 2, 3, 4, 5, 11, 17, 23]);
    assert_eq!(summary.hop_count(), 8);
}

#[test]
fn nearest_route_point_reports_position() {
    let graph = grid_graph(6, 4, 50.0);
    let (_, _, route) = two_leg_route(&graph);

    let closest = route.point_closest_to(Point::new(120.0, -30.0));
    assert_close(closest.point.x(), 120.0);
    assert_close(closest.point.y(), 0.0);
    assert_close(closest.position, 120.0);
    assert_close(closest.distance_to_reference, 30.0);

    let closest = route.point_closest_to(Point::new(300.0, 110.0));
    assert_close(closest.point.x(), 250.0);
    assert_close(closest.point.y(), 110.0);
    assert_close(closest.position, 360.0);
    assert_close(closest.distance_to_reference, 50.0);
    assert_close(
        closest.position,
        route.point_closest_to(route.point_at(360.0)).position,
    );
}

#[test]
fn nodes_closest_to_positions_follow_the_route() {
    let graph = grid_graph(6, 4, 50.0);
    let (_, _, route) = two_leg_route(&graph);

    assert_eq!(route.node_closest_to(0.0), 0);
    assert_eq!(route.node_closest_to(24.0), 0);
    assert_eq!(route.node_closest_to(26.0), 1);
    assert_eq!(route.node_closest_to(340.0), 17);
    assert_eq!(route.node_closest_to(route.length()), 23);
}

#[test]
fn broken_or_empty_routes_are_rejected() {
    let graph = grid_graph(3, 3, 10.0);
    let computer = RouteComputer::new(&graph, UniformCost);
    let a = computer.best_route_between(0, 2).unwrap().unwrap();
    let b = computer.best_route_between(6, 8).unwrap().unwrap();

    assert!(matches!(SingleRoute::new(Vec::new()), Err(Error::EmptyRoute)));
    assert!(matches!(MultiRoute::new(Vec::new()), Err(Error::EmptyMultiRoute)));
    assert!(matches!(
        MultiRoute::new(vec![a.into(), b.into()]),
        Err(Error::DiscontinuousRoute { index: 1 })
    ));
}
