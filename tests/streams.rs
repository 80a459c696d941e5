//! Tests that build lane and road streams over small networks.

mod common;

use common::{chain, chain_with_config, linear_graph, sectioned_road};
use road_stream::*;
use std::sync::Arc;

fn placement<K: Copy + PartialEq>(stream: &Stream<K>) -> Vec<(K, f64, bool)> {
    stream
        .elements()
        .iter()
        .map(|e| (e.element, e.s_offset, e.in_stream_direction))
        .collect()
}

/// Test that lanes are placed end to end along the route.
#[test]
fn lane_stream_accumulates_offsets() {
    let chain = chain(false, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 50.0);
    let [a, b, c] = chain.lanes;
    assert_eq!(
        placement(&stream),
        vec![(a, 0.0, true), (b, 100.0, true), (c, 250.0, true)]
    );
    assert_eq!(stream.length(), 450.0);
}

/// Test that a lane driven against its own coordinate is offset from its far end.
#[test]
fn lane_stream_against_road_direction() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 50.0);
    let [a, b, c] = chain.lanes;
    assert_eq!(
        placement(&stream),
        vec![(a, 0.0, true), (b, 250.0, false), (c, 250.0, true)]
    );
    assert_eq!(stream.elements()[1].start_s(), 100.0);
    assert_eq!(stream.elements()[1].end_s(), 250.0);
    assert_eq!(stream.position_by_element_and_s(b, 20.0), Some(230.0));
    assert_eq!(stream.element_and_s_by_position(230.0), Some((b, 20.0)));

    let position = stream
        .stream_position(&chain.net, &GlobalRoadPosition::new("B", -1, 20.0, 1.0, 0.0))
        .unwrap();
    assert_eq!(position, StreamPosition { s: 230.0, t: -1.0 });
    let back = stream.road_position(&chain.net, position).unwrap();
    assert_eq!((back.road_id.as_str(), back.lane_id, back.s, back.t), ("B", -1, 20.0, 1.0));
}

/// Test that reversing a stream flips every element and restarts the offsets at zero.
#[test]
fn reversed_lane_stream() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 50.0);
    let [a, b, c] = chain.lanes;
    assert_eq!(
        placement(&stream.reverse()),
        vec![(c, 200.0, false), (b, 200.0, true), (a, 450.0, false)]
    );
}

/// Test that every lane of a stream hands out the same cached stream.
#[test]
fn lane_streams_are_cached() {
    let chain = chain(false, LaneType::Driving);
    let first = chain.net.create_lane_stream(&chain.route, "A", -1, 50.0);
    let second = chain.net.create_lane_stream(&chain.route, "C", -1, 10.0);
    assert!(Arc::ptr_eq(&first, &second));

    let other_route = Route::new(vec![RouteElement::new("B", true), RouteElement::new("C", true)]);
    let third = chain.net.create_lane_stream(&other_route, "C", -1, 10.0);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.elements().len(), 2);
}

/// Test that neighbouring lanes of the same road and route get streams of their own.
#[test]
fn neighbouring_lanes_miss_the_cache() {
    let road = sectioned_road();
    let route = Route::new(vec![RouteElement::new("R", true)]);
    let right = road.net.create_lane_stream(&route, "R", -2, 50.0);
    let inner = road.net.create_lane_stream(&route, "R", -1, 50.0);
    assert!(!Arc::ptr_eq(&right, &inner));
    assert_eq!(
        placement(&inner).iter().map(|(lane, ..)| *lane).collect::<Vec<_>>(),
        vec![road.lanes[0][1], road.lanes[1][1], road.lanes[2][1]]
    );
    assert_eq!(
        placement(&right).iter().map(|(lane, ..)| *lane).collect::<Vec<_>>(),
        vec![road.lanes[0][2], road.lanes[1][2], road.lanes[2][1]]
    );
    assert!(Arc::ptr_eq(&right, &road.net.create_lane_stream(&route, "R", -2, 150.0)));
}

/// Test that the lane type changes are reported where each lane begins on the stream.
#[test]
fn lane_type_changes_along_stream() {
    let shoulder = chain(true, LaneType::Shoulder);
    let stream = shoulder.net.create_lane_stream(&shoulder.route, "A", -1, 50.0);
    assert_eq!(
        stream.lane_types(&shoulder.net),
        vec![
            (0.0, LaneType::Driving),
            (100.0, LaneType::Shoulder),
            (250.0, LaneType::Driving),
        ]
    );

    let uniform = chain(false, LaneType::Driving);
    let stream = uniform.net.create_lane_stream(&uniform.route, "B", -1, 50.0);
    assert_eq!(stream.lane_types(&uniform.net), vec![(0.0, LaneType::Driving)]);
}

/// Test that a lane missing from the network gives an empty stream.
#[test]
fn unknown_lane_gives_empty_stream() {
    let chain = chain(false, LaneType::Driving);
    assert!(chain.net.create_lane_stream(&chain.route, "A", -3, 50.0).is_empty());
    assert!(chain.net.create_lane_stream(&chain.route, "X", -1, 50.0).is_empty());
}

/// Test that the road stream follows the route's directions.
#[test]
fn road_stream_follows_route() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_road_stream(&chain.route);
    let [a, b, c] = chain.roads;
    assert_eq!(
        placement(&stream),
        vec![(a, 0.0, true), (b, 250.0, false), (c, 250.0, true)]
    );
}

/// Test that the lane multi-stream places lanes the way the lane stream does.
#[test]
fn lane_multi_stream_offsets() {
    let chain = chain(true, LaneType::Driving);
    let (graph, v) = linear_graph(&[("A", true), ("B", false), ("C", true)]);
    let stream = chain.net.create_lane_multi_stream(&graph, v[0], -1, 0.0);
    let [a, b, c] = chain.lanes;
    let nodes = stream
        .nodes()
        .map(|node| {
            let info = node.element.unwrap();
            (node.vertex, info.element, info.s_offset, info.in_stream_direction)
        })
        .collect::<Vec<_>>();
    assert_eq!(
        nodes,
        vec![
            (v[0], a, 0.0, true),
            (v[1], b, 250.0, false),
            (v[2], c, 250.0, true)
        ]
    );
    assert_eq!(stream.position_by_vertex_and_s(v[1], 20.0), Some(230.0));
}

/// Test that multi-stream construction stops at the node limit and at the search horizon.
#[test]
fn multi_stream_limits() {
    let limited = chain_with_config(
        false,
        LaneType::Driving,
        QueryConfig::default().with_max_multi_stream_nodes(2),
    );
    let (graph, v) = linear_graph(&[("A", true), ("B", true), ("C", true)]);
    assert_eq!(limited.net.create_lane_multi_stream(&graph, v[0], -1, 0.0).node_count(), 2);

    let short = chain_with_config(
        false,
        LaneType::Driving,
        QueryConfig::default().with_max_search_length(100.0),
    );
    assert_eq!(short.net.create_lane_multi_stream(&graph, v[0], -1, 0.0).node_count(), 1);
    assert_eq!(short.net.create_road_multi_stream(&graph, v[0]).node_count(), 1);
}

/// Test that the road graph follows road links, including into reversed roads.
#[test]
fn road_graph_from_network() {
    let chain = chain(true, LaneType::Driving);
    let (graph, root) = RoadGraph::from_network(&chain.net, RouteElement::new("A", true), 5);
    assert_eq!(graph.vertex_count(), 3);
    let b = graph.successors(root)[0];
    assert_eq!(graph.element(b), Some(&RouteElement::new("B", false)));
    let c = graph.successors(b)[0];
    assert_eq!(graph.element(c), Some(&RouteElement::new("C", true)));

    let route = graph.shortest_route(&chain.net, root, "C").unwrap();
    assert_eq!(route.roads, chain.route.roads);
    assert!(route.junctions.is_empty());
}
