use crate::ObjectId;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether an object can move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    Moving,
    Stationary,
}

/// Selects objects by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectType {
    #[default]
    Any,
    Moving,
    Stationary,
}

impl ObjectType {
    /// Returns true if objects of the given kind are selected.
    pub fn matches(&self, kind: ObjectKind) -> bool {
        match self {
            ObjectType::Any => true,
            ObjectType::Moving => kind == ObjectKind::Moving,
            ObjectType::Stationary => kind == ObjectKind::Stationary,
        }
    }
}

/// A position expressed in the coordinates of a lane.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalRoadPosition {
    /// The human-readable road ID.
    pub road_id: String,
    /// The signed, human-readable lane ID.
    pub lane_id: i32,
    /// The road coordinate, in m.
    pub s: f64,
    /// The lateral offset from the lane centre, positive to the left, in m.
    pub t: f64,
    /// The heading relative to the lane, in radians.
    pub yaw: f64,
}

impl GlobalRoadPosition {
    pub fn new(road_id: &str, lane_id: i32, s: f64, t: f64, yaw: f64) -> Self {
        Self {
            road_id: road_id.to_owned(),
            lane_id,
            s,
            t,
            yaw,
        }
    }
}

/// The part of a road touched by an object.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadInterval {
    /// The signed IDs of the touched lanes.
    pub lanes: Vec<i32>,
    /// The smallest touched road coordinate, in m.
    pub s_start: f64,
    /// The largest touched road coordinate, in m.
    pub s_end: f64,
}

impl RoadInterval {
    pub fn new(lanes: Vec<i32>, s_start: f64, s_end: f64) -> Self {
        Self {
            lanes,
            s_start,
            s_end,
        }
    }
}

/// Where an object is in the road network, as determined by localisation.
///
/// All maps are keyed by human-readable road ID.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectPosition {
    /// The object's reference point on each road it lies on.
    pub reference_point: HashMap<String, GlobalRoadPosition>,
    /// The object's main locator point on each road it lies on.
    pub main_locate_point: HashMap<String, GlobalRoadPosition>,
    /// The intervals of each road touched by the object.
    pub touched_roads: HashMap<String, RoadInterval>,
}

impl ObjectPosition {
    /// Adds a touched road interval.
    pub fn with_touched_road(mut self, road_id: &str, interval: RoadInterval) -> Self {
        self.touched_roads.insert(road_id.to_owned(), interval);
        self
    }

    /// Adds a reference point position.
    pub fn with_reference_point(mut self, position: GlobalRoadPosition) -> Self {
        self.reference_point
            .insert(position.road_id.clone(), position);
        self
    }

    /// Adds a main locator point position.
    pub fn with_main_locate_point(mut self, position: GlobalRoadPosition) -> Self {
        self.main_locate_point
            .insert(position.road_id.clone(), position);
        self
    }
}

/// A moving or stationary object in the road network.
#[derive(Clone, Debug)]
pub struct WorldObject {
    /// The object ID.
    id: ObjectId,
    kind: ObjectKind,
    /// The most recent localisation result.
    pub(crate) position: ObjectPosition,
}

impl WorldObject {
    pub(crate) fn new(id: ObjectId, kind: ObjectKind, position: ObjectPosition) -> Self {
        Self { id, kind, position }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Gets the most recent localisation result.
    pub fn position(&self) -> &ObjectPosition {
        &self.position
    }
}
