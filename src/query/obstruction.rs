use super::Obstruction;
use crate::math::{perpendicular_distance, Point2d};
use crate::stream::{LaneMultiStream, LaneStream, StreamInfo};
use crate::{LaneId, ObjectPosition, RoadGraphVertex, RoadNetwork};
use cgmath::MetricSpace;
use std::collections::HashMap;

/// The two points spanning the lateral reference line, once found.
type LinePoints = (Option<Point2d>, Option<Point2d>);

impl RoadNetwork {
    /// Offsets a point on the lane laterally, if the lane covers road coordinate `s`.
    fn point_on_lane(&self, lane: LaneId, s: f64, t: f64) -> Option<Point2d> {
        let lane = self.lane(lane);
        if s < lane.road_start() || s > lane.road_end() {
            return None;
        }
        lane.point_at(s).map(|point| point.offset(t))
    }

    /// Looks for the ends of the reference line on one stream lane.
    fn obstruction_line_step(
        &self,
        info: &StreamInfo<LaneId>,
        t: f64,
        other: &ObjectPosition,
        (first, second): LinePoints,
    ) -> LinePoints {
        let road = self.road_od_id(self.lane(info.element).road());
        let Some(touched) = other.touched_roads.get(road) else {
            return (first, second);
        };
        let (near, far, t) = if info.in_stream_direction {
            (touched.s_start, touched.s_end, t)
        } else {
            (touched.s_end, touched.s_start, -t)
        };
        (
            first.or_else(|| self.point_on_lane(info.element, near, t)),
            second.or_else(|| self.point_on_lane(info.element, far, t)),
        )
    }

    /// Measures the corners of an object against the line from `first` to `second`.
    fn obstruction_of(line: LinePoints, corners: &[Point2d], main_lane_locator: Point2d) -> Obstruction {
        let (Some(first), Some(second)) = line else {
            return Obstruction::invalid();
        };
        if first.distance2(second) < f64::EPSILON {
            return Obstruction::invalid();
        }
        let (left, right) = corners
            .iter()
            .map(|corner| perpendicular_distance(*corner, first, second))
            .fold((f64::MIN, f64::MAX), |(left, right), d| (left.max(d), right.min(d)));
        Obstruction::new(left, right, perpendicular_distance(main_lane_locator, first, second))
    }

    /// Computes how far another object reaches to the left and right of a line
    /// running `t` m beside the stream, along the part of the stream it touches.
    ///
    /// # Parameters
    /// * `stream` - The lane stream of the own object
    /// * `t` - The lateral offset of the line from the lane centre, positive to the left
    /// * `other` - The position of the other object
    /// * `corners` - The corners of the other object's bounding box
    /// * `main_lane_locator` - The point of the other object used to locate it on a lane
    pub fn obstruction(
        &self,
        stream: &LaneStream,
        t: f64,
        other: &ObjectPosition,
        corners: &[Point2d],
        main_lane_locator: Point2d,
    ) -> Obstruction {
        let mut line = (None, None);
        for info in stream.elements() {
            line = self.obstruction_line_step(info, t, other, line);
            if let (Some(_), Some(_)) = line {
                break;
            }
        }
        Self::obstruction_of(line, corners, main_lane_locator)
    }

    /// Computes [RoadNetwork::obstruction] for every branch of a multi-stream.
    pub fn obstruction_multi(
        &self,
        stream: &LaneMultiStream,
        t: f64,
        other: &ObjectPosition,
        corners: &[Point2d],
        main_lane_locator: Point2d,
    ) -> HashMap<RoadGraphVertex, Obstruction> {
        stream
            .traverse((None, None), |info, parent| {
                self.obstruction_line_step(info, t, other, *parent)
            })
            .into_iter()
            .map(|(vertex, line)| (vertex, Self::obstruction_of(line, corners, main_lane_locator)))
            .collect()
    }
}
