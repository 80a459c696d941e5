//! Linear and branching sequences of lanes or roads along a route.

pub use cache::StreamCache;
pub use multi::{LaneMultiStream, MultiStream, MultiStreamNode, RoadMultiStream};

use crate::util::Interval;
use crate::{GlobalRoadPosition, LaneId, LaneType, RoadId, RoadNetwork};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod build;
mod cache;
mod multi;

/// An element of a stream, with its placement along the stream.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamInfo<K> {
    /// The lane or road.
    pub element: K,
    /// The stream position of the element's own `s = 0`, in m.
    pub s_offset: f64,
    /// Whether the element is travelled along its own coordinate.
    pub in_stream_direction: bool,
    /// The length of the element in m.
    pub length: f64,
    /// The road coordinate at which the element starts; zero for roads.
    pub road_start: f64,
}

impl<K: Copy> StreamInfo<K> {
    /// Places an element that starts at stream position `start`.
    pub fn new(element: K, start: f64, in_stream_direction: bool, length: f64, road_start: f64) -> Self {
        Self {
            element,
            s_offset: start + if in_stream_direction { 0.0 } else { length },
            in_stream_direction,
            length,
            road_start,
        }
    }

    /// Converts a position along the element into a stream position.
    pub fn stream_position(&self, element_s: f64) -> f64 {
        if self.in_stream_direction {
            self.s_offset + element_s
        } else {
            self.s_offset - element_s
        }
    }

    /// Converts a road coordinate into a stream position.
    pub fn stream_position_of_road_s(&self, road_s: f64) -> f64 {
        self.stream_position(road_s - self.road_start)
    }

    /// Converts a stream position into a position along the element.
    pub fn element_position(&self, stream_s: f64) -> f64 {
        if self.in_stream_direction {
            stream_s - self.s_offset
        } else {
            self.s_offset - stream_s
        }
    }

    /// The stream position at which the element begins.
    pub fn start_s(&self) -> f64 {
        self.s_offset - if self.in_stream_direction { 0.0 } else { self.length }
    }

    /// The stream position at which the element ends.
    pub fn end_s(&self) -> f64 {
        self.s_offset + if self.in_stream_direction { self.length } else { 0.0 }
    }

    /// The stream positions covered by the element.
    pub fn interval(&self) -> Interval<f64> {
        Interval::new(self.start_s(), self.end_s())
    }

    /// Maps an interval of road coordinates onto the stream.
    pub fn stream_interval_of(&self, road_s_start: f64, road_s_end: f64) -> Interval<f64> {
        Interval::spanning(
            self.stream_position_of_road_s(road_s_start),
            self.stream_position_of_road_s(road_s_end),
        )
    }
}

/// A linear sequence of lanes or roads with accumulated offsets.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stream<K> {
    elements: Vec<StreamInfo<K>>,
}

/// A stream of lanes.
pub type LaneStream = Stream<LaneId>;

/// A stream of roads.
pub type RoadStream = Stream<RoadId>;

impl<K: Copy + PartialEq> Stream<K> {
    /// Creates a stream from placed elements.
    pub fn new(elements: Vec<StreamInfo<K>>) -> Self {
        Self { elements }
    }

    /// Gets the elements of the stream, in stream order.
    pub fn elements(&self) -> &[StreamInfo<K>] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The stream position at which the last element ends.
    pub fn length(&self) -> f64 {
        self.elements.last().map_or(0.0, |e| e.end_s())
    }

    /// Returns the same elements travelled in the opposite direction.
    pub fn reverse(&self) -> Self {
        let mut start = 0.0;
        let elements = self
            .elements
            .iter()
            .rev()
            .map(|old| {
                let info = StreamInfo::new(
                    old.element,
                    start,
                    !old.in_stream_direction,
                    old.length,
                    old.road_start,
                );
                start += old.length;
                info
            })
            .collect();
        Self { elements }
    }

    /// Converts a road coordinate on one of the stream's elements into a stream position.
    pub fn position_by_element_and_s(&self, element: K, road_s: f64) -> Option<f64> {
        self.elements
            .iter()
            .find(|e| e.element == element)
            .map(|e| e.stream_position_of_road_s(road_s))
    }

    /// Finds the element at a stream position, along with the corresponding road coordinate.
    pub fn element_and_s_by_position(&self, position: f64) -> Option<(K, f64)> {
        self.elements
            .iter()
            .find(|e| e.interval().contains(position))
            .map(|e| (e.element, e.element_position(position) + e.road_start))
    }

    /// Returns true if the element is part of the stream.
    pub fn contains(&self, element: K) -> bool {
        self.elements.iter().any(|e| e.element == element)
    }
}

/// A lateral and longitudinal position on a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamPosition {
    /// The stream position, in m.
    pub s: f64,
    /// The lateral offset, positive to the left when looking along the stream, in m.
    pub t: f64,
}

impl LaneStream {
    /// Converts a road position into a stream position.
    pub fn stream_position(&self, net: &RoadNetwork, position: &GlobalRoadPosition) -> Option<StreamPosition> {
        self.elements.iter().find_map(|e| {
            let lane = net.lane(e.element);
            let on_lane = net.road_od_id(lane.road()) == position.road_id
                && lane.od_id() == position.lane_id
                && lane.bounds().contains(position.s);
            on_lane.then(|| StreamPosition {
                s: e.stream_position_of_road_s(position.s),
                t: if e.in_stream_direction { position.t } else { -position.t },
            })
        })
    }

    /// Converts a stream position into a road position on the lane at that position.
    pub fn road_position(&self, net: &RoadNetwork, position: StreamPosition) -> Option<GlobalRoadPosition> {
        let info = self.elements.iter().find(|e| e.interval().contains(position.s))?;
        let lane = net.lane(info.element);
        let (t, yaw) = if info.in_stream_direction {
            (position.t, 0.0)
        } else {
            (-position.t, std::f64::consts::PI)
        };
        Some(GlobalRoadPosition {
            road_id: net.road_od_id(lane.road()).to_owned(),
            lane_id: lane.od_id(),
            s: info.element_position(position.s) + info.road_start,
            t,
            yaw,
        })
    }

    /// Lists where the lane type changes along the stream, as (stream position, new type) pairs.
    pub fn lane_types(&self, net: &RoadNetwork) -> Vec<(f64, LaneType)> {
        let mut types: Vec<(f64, LaneType)> = vec![];
        for info in &self.elements {
            let lane_type = net.lane(info.element).lane_type();
            if types.last().map(|(_, t)| *t) != Some(lane_type) {
                types.push((info.start_s(), lane_type));
            }
        }
        types
    }
}
