//! Tests of the object searches along lane streams.

mod common;

use common::{chain, fork, place_object};
use road_stream::*;

/// Objects placed on the chain network with road B reversed.
struct Scene {
    net: RoadNetwork,
    stream: std::sync::Arc<LaneStream>,
    /// Moving, on A between 10 and 15.
    m1: ObjectId,
    /// Moving, on B between road coordinates 20 and 30, so 220 to 230 along the stream.
    m2: ObjectId,
    /// Moving, across the end of A and the end of B, 95 to 105 along the stream.
    m3: ObjectId,
    /// Stationary, on C between 50 and 60, so 300 to 310 along the stream.
    s1: ObjectId,
}

fn scene() -> Scene {
    let chain = chain(true, LaneType::Driving);
    let mut net = chain.net;
    let m1 = place_object(&mut net, ObjectKind::Moving, &[("A", -1, 10.0, 15.0)]);
    let m2 = place_object(&mut net, ObjectKind::Moving, &[("B", -1, 20.0, 30.0)]);
    let m3 = place_object(&mut net, ObjectKind::Moving, &[("A", -1, 95.0, 100.0), ("B", -1, 145.0, 150.0)]);
    let s1 = place_object(&mut net, ObjectKind::Stationary, &[("C", -1, 50.0, 60.0)]);
    let stream = net.create_lane_stream(&chain.route, "A", -1, 0.0);
    Scene {
        net,
        stream,
        m1,
        m2,
        m3,
        s1,
    }
}

/// Test that objects come in stream order, each one once.
#[test]
fn objects_in_range_are_ordered_and_unique() {
    let s = scene();
    assert_eq!(
        s.net.objects_in_range(&s.stream, 0.0, 450.0, ObjectType::Any),
        vec![s.m1, s.m3, s.m2, s.s1]
    );
    assert_eq!(
        s.net.objects_in_range(&s.stream, 0.0, 450.0, ObjectType::Moving),
        vec![s.m1, s.m3, s.m2]
    );
    assert_eq!(
        s.net.objects_in_range(&s.stream, 0.0, 450.0, ObjectType::Stationary),
        vec![s.s1]
    );
}

/// Test that objects just touching the range bounds are not in range.
#[test]
fn objects_on_range_border() {
    let s = scene();
    assert_eq!(s.net.objects_in_range(&s.stream, 15.0, 220.0, ObjectType::Any), vec![s.m3]);
    assert_eq!(
        s.net.objects_in_range(&s.stream, 14.0, 221.0, ObjectType::Any),
        vec![s.m1, s.m3, s.m2]
    );
}

/// Test the nearest and furthest object searches.
#[test]
fn next_and_last_object() {
    let s = scene();
    let net = &s.net;
    assert_eq!(net.next_object_in_lane(&s.stream, 0.0, 40.0, ObjectType::Any), Some(s.m1));
    assert_eq!(net.next_object_in_lane(&s.stream, 50.0, 300.0, ObjectType::Any), Some(s.m3));
    assert_eq!(net.next_object_in_lane(&s.stream, 110.0, 50.0, ObjectType::Any), None);
    assert_eq!(net.last_object_in_lane(&s.stream, 50.0, 300.0, ObjectType::Any), Some(s.s1));
    assert_eq!(net.last_object_in_lane(&s.stream, 50.0, 300.0, ObjectType::Moving), Some(s.m2));
    assert_eq!(net.last_object_in_lane(&s.stream, 0.0, 12.0, ObjectType::Any), Some(s.m1));
}

/// Test that removed and unassigned objects are no longer found.
#[test]
fn removed_objects_are_not_found() {
    let mut s = scene();
    s.net.remove_object(s.m2);
    assert!(s.net.object(s.m2).is_none());
    assert_eq!(
        s.net.objects_in_range(&s.stream, 0.0, 450.0, ObjectType::Any),
        vec![s.m1, s.m3, s.s1]
    );
    s.net.clear_object_assignments();
    assert!(s.net.objects_in_range(&s.stream, 0.0, 450.0, ObjectType::Any).is_empty());
    assert_eq!(s.net.iter_objects().count(), 3);
}

/// Test the object searches on every branch of a multi-stream.
#[test]
fn objects_per_branch() {
    let mut fork = fork();
    let [va, vb, vc, vd] = fork.vertices;
    let o1 = place_object(&mut fork.net, ObjectKind::Moving, &[("B", -1, 10.0, 20.0)]);
    let o2 = place_object(&mut fork.net, ObjectKind::Moving, &[("A", -1, 70.0, 80.0)]);
    let o3 = place_object(&mut fork.net, ObjectKind::Moving, &[("C", -1, 20.0, 25.0)]);
    let o4 = place_object(&mut fork.net, ObjectKind::Stationary, &[("D", -1, 5.0, 6.0)]);
    let net = &fork.net;
    let stream = net.create_lane_multi_stream(&fork.graph, va, -1, 40.0);

    let found = net.objects_in_range_multi(&stream, 40.0, 1000.0, ObjectType::Any);
    assert_eq!(found[&va], vec![o2]);
    assert_eq!(found[&vb], vec![o2, o1]);
    assert_eq!(found[&vc], vec![o2, o3]);
    assert_eq!(found[&vd], vec![o2, o1, o4]);

    let next = net.next_object_in_lane_multi(&stream, 85.0, 1000.0, ObjectType::Any);
    assert_eq!(next[&va], None);
    assert_eq!(next[&vb], Some(o1));
    assert_eq!(next[&vc], Some(o3));
    assert_eq!(next[&vd], Some(o1));

    let last = net.last_object_in_lane_multi(&stream, 85.0, 1000.0, ObjectType::Any);
    assert_eq!(last[&va], None);
    assert_eq!(last[&vd], Some(o4));
    let last = net.last_object_in_lane_multi(&stream, 85.0, 1000.0, ObjectType::Moving);
    assert_eq!(last[&vd], Some(o1));
    assert_eq!(last[&vc], Some(o3));
}
