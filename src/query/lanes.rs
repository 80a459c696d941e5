use crate::stream::LaneMultiStream;
use crate::{Lane, LaneType, RoadGraphVertex, RoadNetwork, Section, Side};
use std::collections::HashMap;

impl RoadNetwork {
    /// Finds the section of a road covering road coordinate `s`.
    ///
    /// Negative coordinates are clamped to zero. Where two sections meet,
    /// the upstream section is returned.
    pub fn section_by_distance(&self, road_id: &str, s: f64) -> Option<&Section> {
        let road = self.road_by_od_id(road_id)?;
        let s = s.max(0.0);
        road.sections()
            .iter()
            .map(|id| self.section(*id))
            .find(|section| section.covers(s))
    }

    /// Finds a lane by its human-readable road ID, signed lane ID and road coordinate.
    ///
    /// Returns [Lane::invalid] if there is no such lane.
    pub fn lane_by_od_id(&self, road_id: &str, lane_id: i32, s: f64) -> &Lane {
        self.section_by_distance(road_id, s)
            .and_then(|section| {
                section
                    .lanes()
                    .iter()
                    .map(|id| self.lane(*id))
                    .find(|lane| lane.od_id() == lane_id)
            })
            .unwrap_or_else(|| Lane::invalid())
    }

    /// Returns true if the lane exists at road coordinate `s`.
    pub fn is_s_valid_on_lane(&self, road_id: &str, lane_id: i32, s: f64) -> bool {
        s >= 0.0 && self.lane_by_od_id(road_id, lane_id, s).exists()
    }

    /// Counts the lanes of the section covering road coordinate `s`.
    pub fn number_of_lanes(&self, road_id: &str, s: f64) -> usize {
        self.section_by_distance(road_id, s)
            .map_or(0, |section| section.lanes().len())
    }

    /// Probes downstream in steps of `step` for the next road coordinate at which the lane exists.
    ///
    /// Returns `f64::INFINITY` if there is none within the maximum search length,
    /// or if `step` is not positive.
    pub fn next_valid_s_on_lane_in_downstream(&self, road_id: &str, lane_id: i32, s: f64, step: f64) -> f64 {
        if step.is_nan() || step <= 0.0 {
            return f64::INFINITY;
        }
        let max_distance = s + self.config.max_search_length;
        let mut next = s + step;
        while next < max_distance {
            if self.is_s_valid_on_lane(road_id, lane_id, next) {
                return next;
            }
            next += step;
        }
        f64::INFINITY
    }

    /// Probes upstream in steps of `step` for the last road coordinate at which the lane exists.
    ///
    /// Returns `f64::NEG_INFINITY` if there is none between zero and the maximum search length,
    /// or if `step` is not positive.
    pub fn last_valid_s_in_upstream(&self, road_id: &str, lane_id: i32, s: f64, step: f64) -> f64 {
        if step.is_nan() || step <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let min_distance = (s - self.config.max_search_length).max(0.0);
        let mut last = s - step;
        while last >= min_distance {
            if self.is_s_valid_on_lane(road_id, lane_id, last) {
                return last;
            }
            last -= step;
        }
        f64::NEG_INFINITY
    }

    /// Probes with the configured step; see [RoadNetwork::next_valid_s_on_lane_in_downstream].
    pub fn next_valid_s(&self, road_id: &str, lane_id: i32, s: f64) -> f64 {
        self.next_valid_s_on_lane_in_downstream(road_id, lane_id, s, self.config.valid_s_step)
    }

    /// Probes with the configured step; see [RoadNetwork::last_valid_s_in_upstream].
    pub fn last_valid_s(&self, road_id: &str, lane_id: i32, s: f64) -> f64 {
        self.last_valid_s_in_upstream(road_id, lane_id, s, self.config.valid_s_step)
    }

    /// Returns true if the neighbouring lane on `side` exists and is a driving lane.
    pub fn exists_driving_lane_on_side(&self, road_id: &str, lane_id: i32, s: f64, side: Side) -> bool {
        self.lane_by_od_id(road_id, lane_id, s)
            .neighbour(side)
            .map_or(false, |id| self.lane(id).lane_type() == LaneType::Driving)
    }

    /// Lists the lanes of the requested types at road coordinate `s`, from left to right.
    pub fn lanes_of_lane_type_at_distance(&self, road_id: &str, s: f64, lane_types: &[LaneType]) -> Vec<&Lane> {
        self.section_by_distance(road_id, s)
            .map(|section| {
                section
                    .lanes()
                    .iter()
                    .map(|id| self.lane(*id))
                    .filter(|lane| lane_types.contains(&lane.lane_type()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Evaluates a lane property at a stream position on every branch of a multi-stream.
    ///
    /// `property` receives the lane, the road coordinate and whether the lane is
    /// driven along its own direction. Branches that do not reach the position
    /// keep the value of their parent; the root defaults to zero.
    fn lane_property_at(
        &self,
        stream: &LaneMultiStream,
        position: f64,
        property: impl Fn(&Lane, f64, bool) -> f64,
    ) -> HashMap<RoadGraphVertex, f64> {
        stream.traverse(0.0, |info, parent| {
            if info.interval().contains(position) {
                let lane = self.lane(info.element);
                let road_s = info.element_position(position) + info.road_start;
                property(lane, road_s, info.in_stream_direction)
            } else {
                *parent
            }
        })
    }

    /// Gets the curvature of the lane at a stream position, per branch, in 1/m.
    ///
    /// The sign is flipped on lanes driven against their own direction.
    pub fn lane_curvature(&self, stream: &LaneMultiStream, position: f64) -> HashMap<RoadGraphVertex, f64> {
        self.lane_property_at(stream, position, |lane, s, along| {
            if along {
                lane.curvature(s)
            } else {
                -lane.curvature(s)
            }
        })
    }

    /// Gets the width of the lane at a stream position, per branch, in m.
    pub fn lane_width(&self, stream: &LaneMultiStream, position: f64) -> HashMap<RoadGraphVertex, f64> {
        self.lane_property_at(stream, position, |lane, s, _| lane.width(s))
    }

    /// Gets the heading of the lane at a stream position, per branch, in radians.
    ///
    /// Lanes driven against their own direction report the opposite heading.
    pub fn lane_direction(&self, stream: &LaneMultiStream, position: f64) -> HashMap<RoadGraphVertex, f64> {
        self.lane_property_at(stream, position, |lane, s, along| {
            if along {
                lane.direction(s)
            } else {
                lane.direction(s) + std::f64::consts::PI
            }
        })
    }
}
