//! Tests of the lateral obstruction of a lane by another object.

mod common;

use assert_approx_eq::assert_approx_eq;
use common::{chain, fork};
use road_stream::math::Point2d;
use road_stream::*;

fn touching(road: &str, s_start: f64, s_end: f64) -> ObjectPosition {
    ObjectPosition::default().with_touched_road(road, RoadInterval::new(vec![-1], s_start, s_end))
}

/// The corners of a box between the given coordinates.
fn corners(x: (f64, f64), y: (f64, f64)) -> Vec<Point2d> {
    vec![
        Point2d::new(x.0, y.0),
        Point2d::new(x.1, y.0),
        Point2d::new(x.1, y.1),
        Point2d::new(x.0, y.1),
    ]
}

/// Test the obstruction measured against the centre line and a shifted line.
#[test]
fn obstruction_along_lane() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 0.0);
    let other = touching("A", 20.0, 30.0);
    let corners = corners((22.0, 28.0), (-3.5, -1.0));

    let obstruction = chain
        .net
        .obstruction(&stream, 0.0, &other, &corners, Point2d::new(25.0, -2.5));
    assert!(obstruction.valid);
    assert_approx_eq!(obstruction.left, 1.0);
    assert_approx_eq!(obstruction.right, -1.5);
    assert_approx_eq!(obstruction.main_lane_locator, -0.5);

    let obstruction = chain
        .net
        .obstruction(&stream, 0.5, &other, &corners, Point2d::new(25.0, -2.5));
    assert_approx_eq!(obstruction.left, 0.5);
    assert_approx_eq!(obstruction.right, -2.0);
    assert_approx_eq!(obstruction.main_lane_locator, -1.0);
}

/// Test that on a lane driven against its own coordinate, left and right follow the driver.
#[test]
fn obstruction_against_lane_direction() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 0.0);
    let other = touching("B", 20.0, 30.0);
    let corners = corners((22.0, 28.0), (-1.5, -1.0));

    let obstruction = chain
        .net
        .obstruction(&stream, 0.0, &other, &corners, Point2d::new(25.0, -1.0));
    assert!(obstruction.valid);
    assert_approx_eq!(obstruction.left, -0.5);
    assert_approx_eq!(obstruction.right, -1.0);

    let obstruction = chain
        .net
        .obstruction(&stream, 1.0, &other, &corners, Point2d::new(25.0, -1.0));
    assert_approx_eq!(obstruction.left, -1.5);
    assert_approx_eq!(obstruction.right, -2.0);
    assert_approx_eq!(obstruction.main_lane_locator, -2.0);
}

/// Test that objects which cannot be placed on the stream give an invalid obstruction.
#[test]
fn invalid_obstruction() {
    let chain = chain(true, LaneType::Driving);
    let stream = chain.net.create_lane_stream(&chain.route, "A", -1, 0.0);
    let corners = corners((22.0, 28.0), (-3.5, -1.0));
    let locator = Point2d::new(25.0, -2.0);

    let elsewhere = chain.net.obstruction(&stream, 0.0, &touching("X", 20.0, 30.0), &corners, locator);
    assert_eq!(elsewhere, Obstruction::invalid());
    let point = chain.net.obstruction(&stream, 0.0, &touching("A", 20.0, 20.0), &corners, locator);
    assert!(!point.valid);
    let beyond = chain.net.obstruction(&stream, 0.0, &touching("A", 90.0, 120.0), &corners, locator);
    assert!(!beyond.valid);
}

/// Test that only branches passing the object see an obstruction.
#[test]
fn obstruction_per_branch() {
    let fork = fork();
    let [va, vb, vc, vd] = fork.vertices;
    let stream = fork.net.create_lane_multi_stream(&fork.graph, va, -1, 0.0);
    let other = touching("B", 10.0, 20.0);
    let corners = corners((12.0, 18.0), (-3.0, -1.0));
    let per_branch = fork
        .net
        .obstruction_multi(&stream, 0.0, &other, &corners, Point2d::new(15.0, -2.0));
    assert!(!per_branch[&va].valid);
    assert!(!per_branch[&vc].valid);
    assert!(per_branch[&vb].valid);
    assert_eq!(per_branch[&vd], per_branch[&vb]);
    assert_approx_eq!(per_branch[&vb].left, 1.0);
    assert_approx_eq!(per_branch[&vb].right, -1.0);
}
