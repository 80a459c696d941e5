//! Questions asked of the road network along streams and multi-streams.
//!
//! Every query is a method of [RoadNetwork](crate::RoadNetwork). Queries over a
//! multi-stream answer once per road graph vertex. Lookups that find nothing
//! answer with a sentinel: an infinite distance, an empty list or the invalid lane.

use crate::IntersectingConnectionRank;
use crate::LaneType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod distance;
mod junctions;
mod lanes;
mod markings;
mod objects;
mod obstruction;
mod relative;

/// The longitudinal distance between two objects along a stream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LongitudinalDistance {
    /// The gap between the objects' extents, negative if the target is behind, in m.
    pub net_distance: Option<f64>,
    /// The distance between the objects' reference points, in m.
    pub reference_point: Option<f64>,
}

/// How far another object reaches into the lateral corridor of a lane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstruction {
    /// Whether the object could be placed on the lane at all.
    pub valid: bool,
    /// The leftmost lateral offset of the object, positive to the left, in m.
    pub left: f64,
    /// The rightmost lateral offset of the object, positive to the left, in m.
    pub right: f64,
    /// The lateral offset of the locator point, positive to the left, in m.
    pub main_lane_locator: f64,
}

impl Obstruction {
    pub fn new(left: f64, right: f64, main_lane_locator: f64) -> Self {
        Self {
            valid: true,
            left,
            right,
            main_lane_locator,
        }
    }

    /// An obstruction that could not be computed.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            left: f64::INFINITY,
            right: f64::NEG_INFINITY,
            main_lane_locator: 0.0,
        }
    }
}

/// A lane described relative to the lane of the querying object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativeLane {
    /// Zero for the own lane, negative to the right and positive to the left.
    pub relative_id: i32,
    /// Whether the lane is driven in the same direction as the own lane.
    pub in_driving_direction: bool,
    pub lane_type: LaneType,
    /// The relative ID of the lane preceding this one, in the previous interval.
    pub predecessor: Option<i32>,
    /// The relative ID of the lane following this one, in the next interval.
    pub successor: Option<i32>,
}

/// The lanes of one section, relative to the querying object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LanesInterval {
    /// The start of the section relative to the query position, in m.
    pub start_s: f64,
    /// The end of the section relative to the query position, in m.
    pub end_s: f64,
    pub lanes: Vec<RelativeLane>,
}

/// A junction connector ahead of or behind the querying object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativeJunction {
    /// The start of the connector within the window, relative to the query position, in m.
    pub start_s: f64,
    /// The end of the connector within the window, relative to the query position, in m.
    pub end_s: f64,
    /// The human-readable ID of the connector.
    pub connecting_road: String,
}

/// A connector crossing another connector of the same junction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntersectingConnection {
    /// The human-readable ID of the crossing connector.
    pub road_id: String,
    pub rank: IntersectingConnectionRank,
}

/// A way through a junction from an incoming road.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JunctionConnection {
    pub connecting_road_id: String,
    pub outgoing_road_id: String,
    /// Whether the outgoing road is driven along its own coordinate.
    pub outgoing_stream_direction: bool,
}

/// A (high priority, low priority) pair of connectors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JunctionPriority {
    pub high: String,
    pub low: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoadNetworkElementType {
    Road,
    Junction,
    None,
}

/// A road or junction, by human-readable ID.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadNetworkElement {
    pub element_type: RoadNetworkElementType,
    pub id: String,
}

impl RoadNetworkElement {
    pub fn none() -> Self {
        Self {
            element_type: RoadNetworkElementType::None,
            id: String::new(),
        }
    }
}

/// The progress of a search along one branch of a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SearchState {
    /// Nothing found yet; continue with the next element.
    Searching(f64),
    /// The search ended with this result.
    Found(f64),
    /// An element of an unwanted type ended the search at this distance.
    WrongType(f64),
    /// The search horizon was passed.
    Exhausted,
}

impl SearchState {
    /// Returns true if elements after this one cannot change the result.
    pub(crate) fn is_final(&self) -> bool {
        !matches!(self, SearchState::Searching(_))
    }

    pub(crate) fn value(&self) -> f64 {
        match self {
            SearchState::Searching(value) | SearchState::Found(value) | SearchState::WrongType(value) => *value,
            SearchState::Exhausted => f64::INFINITY,
        }
    }
}
