//! Errors raised while building or querying a road network.
//!
//! Lookups that simply find nothing never produce an error; they return
//! sentinels such as `f64::INFINITY`, an empty collection or the invalid lane.
//! Errors are reserved for input the importer should never have produced.

use thiserror::Error;

/// A malformed road network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("road id {0:?} is used more than once")]
    DuplicateRoad(String),

    #[error("junction id {0:?} is used more than once")]
    DuplicateJunction(String),

    #[error("lane id {lane} is used more than once in a section of road {road:?}")]
    DuplicateLane { road: String, lane: i32 },

    #[error("road {0:?} has no sections")]
    EmptyRoad(String),

    #[error("section of road {road:?} starting at s = {s} has no lanes")]
    EmptySection { road: String, s: f64 },

    #[error("section of road {road:?} starting at s = {s} does not have a positive length")]
    NonPositiveSectionLength { road: String, s: f64 },

    #[error("sections of road {road:?} are not contiguous at s = {s}")]
    NonContiguousSections { road: String, s: f64 },

    #[error("lane link refers to a lane that is not part of the network")]
    UnknownLane,

    #[error("lane {lane} of road {road:?} is linked to road {target:?}, which the road does not lead to")]
    LaneLinkMismatch { road: String, lane: i32, target: String },

    #[error("a road link refers to an element that is not part of the network")]
    UnknownLinkTarget,

    #[error("road {road:?} is not a connector of junction {junction:?}")]
    NotAConnector { junction: String, road: String },

    #[error("a {left:?}/{right:?} boundary pair cannot form a double lane marking")]
    InvalidDoubleMarking {
        left: crate::LaneMarkingType,
        right: crate::LaneMarkingType,
    },
}

/// Shorthand result type for network construction and checked queries.
pub type NetworkResult<T> = Result<T, NetworkError>;
