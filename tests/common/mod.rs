//! Small road networks shared by the integration tests.

#![allow(dead_code)]

use road_stream::math::Point2d;
use road_stream::*;

/// The width of every fixture lane, in m.
pub const LANE_WIDTH: f64 = 4.0;

/// Describes a straight lane running along the x-axis, with its centre line
/// offset according to its signed ID.
pub fn straight_lane(od_id: i32, lane_type: LaneType, s_start: f64, length: f64) -> LaneAttributes {
    let y = od_id.signum() as f64 * (od_id.abs() as f64 - 0.5) * LANE_WIDTH;
    let joint = |s: f64| GeometryJoint {
        s,
        reference: Point2d::new(s, y),
        width: LANE_WIDTH,
        heading: 0.0,
        curvature: 0.0,
    };
    LaneAttributes {
        od_id,
        lane_type,
        geometry: vec![joint(s_start), joint(s_start + length)],
    }
}

/// Adds a road with a single section holding the given lanes, from left to right.
pub fn add_road(builder: &mut NetworkBuilder, od_id: &str, length: f64, lanes: &[(i32, LaneType)]) -> (RoadId, Vec<LaneId>) {
    let road = builder.add_road(od_id, true);
    let lanes = add_section(builder, road, 0.0, length, lanes);
    (road, lanes)
}

/// Adds a section to a road, holding the given lanes from left to right.
pub fn add_section(
    builder: &mut NetworkBuilder,
    road: RoadId,
    s_start: f64,
    length: f64,
    lanes: &[(i32, LaneType)],
) -> Vec<LaneId> {
    let section = builder.add_section(road, s_start, length);
    lanes
        .iter()
        .map(|(id, lane_type)| builder.add_lane(section, &straight_lane(*id, *lane_type, s_start, length)))
        .collect()
}

/// A network of three single-lane roads A (100 m), B (150 m) and C (200 m)
/// driven after one another.
pub struct Chain {
    pub net: RoadNetwork,
    pub route: Route,
    pub roads: [RoadId; 3],
    pub lanes: [LaneId; 3],
}

/// Builds the [Chain] network.
///
/// # Parameters
/// * `b_reversed` - Whether road B is driven against its own coordinate
/// * `b_type` - The type of the lane on road B
pub fn chain(b_reversed: bool, b_type: LaneType) -> Chain {
    chain_with_config(b_reversed, b_type, QueryConfig::default())
}

pub fn chain_with_config(b_reversed: bool, b_type: LaneType, config: QueryConfig) -> Chain {
    let mut builder = NetworkBuilder::new().with_config(config);
    let (a, a_lanes) = add_road(&mut builder, "A", 100.0, &[(-1, LaneType::Driving)]);
    let (b, b_lanes) = add_road(&mut builder, "B", 150.0, &[(-1, b_type)]);
    let (c, c_lanes) = add_road(&mut builder, "C", 200.0, &[(-1, LaneType::Driving)]);
    let (a_lane, b_lane, c_lane) = (a_lanes[0], b_lanes[0], c_lanes[0]);

    builder.set_road_successor(a, RoadLink::Road(b));
    builder.set_road_predecessor(c, RoadLink::Road(b));
    if b_reversed {
        builder.set_road_successor(b, RoadLink::Road(a));
        builder.set_road_predecessor(b, RoadLink::Road(c));
        builder.add_next_lane(a_lane, b_lane);
        builder.add_next_lane(b_lane, a_lane);
        builder.add_previous_lane(b_lane, c_lane);
        builder.add_previous_lane(c_lane, b_lane);
    } else {
        builder.set_road_predecessor(b, RoadLink::Road(a));
        builder.set_road_successor(b, RoadLink::Road(c));
        builder.connect_lanes(a_lane, b_lane);
        builder.connect_lanes(b_lane, c_lane);
    }

    let route = Route::new(vec![
        RouteElement::new("A", true),
        RouteElement::new("B", !b_reversed),
        RouteElement::new("C", true),
    ]);
    Chain {
        net: builder.build().unwrap(),
        route,
        roads: [a, b, c],
        lanes: [a_lane, b_lane, c_lane],
    }
}

/// Adds an object to the network and places it on the lanes it touches.
pub fn place_object(net: &mut RoadNetwork, kind: ObjectKind, touched: &[(&str, i32, f64, f64)]) -> ObjectId {
    let position = touched
        .iter()
        .fold(ObjectPosition::default(), |position, (road, lane, s_start, s_end)| {
            position
                .with_touched_road(road, RoadInterval::new(vec![*lane], *s_start, *s_end))
                .with_main_locate_point(GlobalRoadPosition::new(road, *lane, *s_start, 0.0, 0.0))
                .with_reference_point(GlobalRoadPosition::new(road, *lane, (s_start + s_end) / 2.0, 0.0, 0.0))
        });
    let id = net.add_object(kind, position);
    net.assign_object_from_position(id);
    id
}

/// Builds a road graph which is a plain chain of the given roads.
pub fn linear_graph(roads: &[(&str, bool)]) -> (RoadGraph, Vec<RoadGraphVertex>) {
    let mut graph = RoadGraph::new();
    let vertices = roads
        .iter()
        .map(|(road, dir)| graph.add_vertex(RouteElement::new(road, *dir)))
        .collect::<Vec<_>>();
    for (from, to) in vertices.iter().zip(vertices.iter().skip(1)) {
        graph.add_edge(*from, *to);
    }
    (graph, vertices)
}

/// A network where road A (100 m) forks into road B (200 m), continued by
/// road D (300 m), and road C (50 m), whose lane is a shoulder.
pub struct Fork {
    pub net: RoadNetwork,
    pub graph: RoadGraph,
    /// The graph vertices of A, B, C and D.
    pub vertices: [RoadGraphVertex; 4],
    /// The lanes of A, B, C and D.
    pub lanes: [LaneId; 4],
}

pub fn fork() -> Fork {
    let mut builder = NetworkBuilder::new();
    let (_, a) = add_road(&mut builder, "A", 100.0, &[(-1, LaneType::Driving)]);
    let (_, b) = add_road(&mut builder, "B", 200.0, &[(-1, LaneType::Driving)]);
    let (_, c) = add_road(&mut builder, "C", 50.0, &[(-1, LaneType::Shoulder)]);
    let (_, d) = add_road(&mut builder, "D", 300.0, &[(-1, LaneType::Driving)]);
    builder.connect_lanes(a[0], b[0]);
    builder.connect_lanes(a[0], c[0]);
    builder.connect_lanes(b[0], d[0]);

    let mut graph = RoadGraph::new();
    let va = graph.add_vertex(RouteElement::new("A", true));
    let vb = graph.add_vertex(RouteElement::new("B", true));
    let vc = graph.add_vertex(RouteElement::new("C", true));
    let vd = graph.add_vertex(RouteElement::new("D", true));
    graph.add_edge(va, vb);
    graph.add_edge(va, vc);
    graph.add_edge(vb, vd);
    Fork {
        net: builder.build().unwrap(),
        graph,
        vertices: [va, vb, vc, vd],
        lanes: [a[0], b[0], c[0], d[0]],
    }
}

/// A 300 m road R split into three 100 m sections:
///
/// * `[0, 100]` holds lanes 1, -1 and -2;
/// * `[100, 200]` holds lanes 1, -1, -2 and the shoulder -3;
/// * `[200, 300]` holds lanes 1 and -1, where lanes -1 and -2 merge.
pub struct SectionedRoad {
    pub net: RoadNetwork,
    pub road: RoadId,
    /// The lanes of each section, from left to right.
    pub lanes: [Vec<LaneId>; 3],
}

pub fn sectioned_road() -> SectionedRoad {
    use LaneType::{Driving, Shoulder};
    let mut builder = NetworkBuilder::new();
    let road = builder.add_road("R", true);
    let s0 = add_section(&mut builder, road, 0.0, 100.0, &[(1, Driving), (-1, Driving), (-2, Driving)]);
    let s1 = add_section(
        &mut builder,
        road,
        100.0,
        100.0,
        &[(1, Driving), (-1, Driving), (-2, Driving), (-3, Shoulder)],
    );
    let s2 = add_section(&mut builder, road, 200.0, 100.0, &[(1, Driving), (-1, Driving)]);
    for i in 0..3 {
        builder.connect_lanes(s0[i], s1[i]);
    }
    builder.connect_lanes(s1[0], s2[0]);
    builder.connect_lanes(s1[1], s2[1]);
    builder.connect_lanes(s1[2], s2[1]);
    SectionedRoad {
        net: builder.build().unwrap(),
        road,
        lanes: [s0, s1, s2],
    }
}
