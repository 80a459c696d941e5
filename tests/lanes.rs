//! Tests of the lane lookups on a road whose lane layout changes along its length.

mod common;

use common::{chain, chain_with_config, linear_graph, sectioned_road};
use road_stream::*;
use std::f64::consts::PI;

/// Test that sections are found by road coordinate, with the upstream one winning at a border.
#[test]
fn sections_by_distance() {
    let road = sectioned_road();
    let net = &road.net;
    assert_eq!(net.number_of_lanes("R", 50.0), 3);
    assert_eq!(net.number_of_lanes("R", 100.0), 3);
    assert_eq!(net.number_of_lanes("R", 150.0), 4);
    assert_eq!(net.number_of_lanes("R", 250.0), 2);
    assert_eq!(net.number_of_lanes("R", -5.0), 3);
    assert_eq!(net.number_of_lanes("R", 301.0), 0);
    assert_eq!(net.number_of_lanes("X", 0.0), 0);
    assert_eq!(net.section_by_distance("R", 150.0).unwrap().bounds(), Interval::new(100.0, 200.0));
}

/// Test the lookup of lanes by their human-readable IDs.
#[test]
fn lanes_by_od_id() {
    let road = sectioned_road();
    let net = &road.net;
    let shoulder = net.lane_by_od_id("R", -3, 150.0);
    assert!(shoulder.exists());
    assert_eq!(shoulder.id(), road.lanes[1][3]);
    assert_eq!(shoulder.lane_type(), LaneType::Shoulder);
    assert!(!net.lane_by_od_id("R", -3, 50.0).exists());
    assert!(!net.lane_by_od_id("X", -1, 50.0).exists());

    assert!(net.is_s_valid_on_lane("R", -3, 150.0));
    assert!(!net.is_s_valid_on_lane("R", -3, 50.0));
    assert!(!net.is_s_valid_on_lane("R", -1, -1.0));
    assert!(!net.is_s_valid_on_lane("R", -1, 400.0));
}

/// Test the probing for the coordinates at which a lane begins and ends.
#[test]
fn valid_s_probing() {
    let road = sectioned_road();
    let net = &road.net;
    assert_eq!(net.next_valid_s("R", -3, 50.0), 101.0);
    assert_eq!(net.next_valid_s_on_lane_in_downstream("R", -3, 50.0, 20.0), 110.0);
    assert_eq!(net.next_valid_s("R", 2, 50.0), f64::INFINITY);
    assert_eq!(net.last_valid_s("R", -2, 250.0), 200.0);
    assert_eq!(net.last_valid_s("R", -3, 50.0), f64::NEG_INFINITY);
}

/// Test that probing with a step that is not positive gives up instead of looping.
#[test]
fn valid_s_probing_with_degenerate_step() {
    let road = sectioned_road();
    let net = &road.net;
    assert_eq!(net.next_valid_s_on_lane_in_downstream("R", -3, 50.0, 0.0), f64::INFINITY);
    assert_eq!(net.next_valid_s_on_lane_in_downstream("R", -3, 50.0, -1.0), f64::INFINITY);
    assert_eq!(net.next_valid_s_on_lane_in_downstream("R", -3, 50.0, f64::NAN), f64::INFINITY);
    assert_eq!(net.last_valid_s_in_upstream("R", -2, 250.0, 0.0), f64::NEG_INFINITY);
    assert_eq!(net.last_valid_s_in_upstream("R", -2, 250.0, f64::NAN), f64::NEG_INFINITY);

    let config = QueryConfig::default().with_valid_s_step(0.0);
    assert_eq!(config.valid_s_step, 1.0);
    let chain = chain_with_config(false, LaneType::Driving, config);
    assert_eq!(chain.net.next_valid_s("A", -1, 50.0), 51.0);
}

/// Test the checks on the neighbouring lanes.
#[test]
fn neighbouring_lanes() {
    let road = sectioned_road();
    let net = &road.net;
    assert!(net.exists_driving_lane_on_side("R", -1, 150.0, Side::Right));
    assert!(net.exists_driving_lane_on_side("R", -1, 150.0, Side::Left));
    assert!(!net.exists_driving_lane_on_side("R", -2, 150.0, Side::Right));
    assert!(!net.exists_driving_lane_on_side("R", 1, 50.0, Side::Left));
    assert!(!net.exists_driving_lane_on_side("R", -3, 50.0, Side::Left));
}

/// Test that lanes are filtered by type and come from left to right.
#[test]
fn lanes_of_type() {
    let road = sectioned_road();
    let net = &road.net;
    let ids = |types: &[LaneType]| {
        net.lanes_of_lane_type_at_distance("R", 150.0, types)
            .iter()
            .map(|lane| lane.od_id())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&[LaneType::Driving]), vec![1, -1, -2]);
    assert_eq!(ids(&[LaneType::Shoulder]), vec![-3]);
    assert_eq!(ids(&[LaneType::Driving, LaneType::Shoulder]), vec![1, -1, -2, -3]);
    assert!(net.lanes_of_lane_type_at_distance("X", 150.0, &[LaneType::Driving]).is_empty());
}

/// Test the lane geometry lookups along every branch of a multi-stream.
#[test]
fn lane_geometry_per_branch() {
    let chain = chain(true, LaneType::Driving);
    let (graph, v) = linear_graph(&[("A", true), ("B", false), ("C", true)]);
    let stream = chain.net.create_lane_multi_stream(&graph, v[0], -1, 0.0);

    let widths = chain.net.lane_width(&stream, 200.0);
    assert_eq!(widths[&v[0]], 0.0);
    assert_eq!(widths[&v[1]], common::LANE_WIDTH);
    assert_eq!(widths[&v[2]], common::LANE_WIDTH);

    let directions = chain.net.lane_direction(&stream, 200.0);
    assert_eq!(directions[&v[1]], PI);
    let directions = chain.net.lane_direction(&stream, 50.0);
    assert_eq!(directions[&v[0]], 0.0);
    assert_eq!(directions[&v[2]], 0.0);

    let curvatures = chain.net.lane_curvature(&stream, 300.0);
    assert_eq!(curvatures[&v[2]], 0.0);
}
