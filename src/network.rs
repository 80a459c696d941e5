pub use builder::NetworkBuilder;
pub use junction::{IntersectingConnectionRank, IntersectionInfo, Junction};
pub use lane::{GeometryJoint, Lane, LaneAttributes, LaneOverlap, LanePoint, LaneType, Side};
pub use marking::*;
pub use object::{
    GlobalRoadPosition, ObjectKind, ObjectPosition, ObjectType, RoadInterval, WorldObject,
};
pub use road::{Road, RoadLink, Section};

use crate::stream::StreamCache;
use crate::{
    JunctionId, JunctionSet, LaneBoundaryId, LaneId, LaneSet, ObjectId, ObjectSet, QueryConfig,
    RoadId, RoadMarkingId, RoadSet, SectionId, SectionSet, TrafficSignId,
};
use slotmap::SlotMap;
use std::collections::HashMap;

mod builder;
mod junction;
mod lane;
mod marking;
mod object;
mod road;

/// A frozen road network together with the objects placed on it.
///
/// The structural entities never change after [NetworkBuilder::build].
/// Objects and their lane assignments are updated through `&mut self`
/// between rounds of queries.
#[derive(Default)]
pub struct RoadNetwork {
    /// The roads in the network.
    pub(crate) roads: RoadSet,
    /// The sections of all roads.
    pub(crate) sections: SectionSet,
    /// The lanes of all sections.
    pub(crate) lanes: LaneSet,
    /// The junctions.
    pub(crate) junctions: JunctionSet,
    pub(crate) boundaries: SlotMap<LaneBoundaryId, LaneBoundary>,
    pub(crate) traffic_signs: SlotMap<TrafficSignId, TrafficSign>,
    pub(crate) road_markings: SlotMap<RoadMarkingId, RoadMarking>,
    /// The moving and stationary objects.
    pub(crate) objects: ObjectSet,
    /// Maps human-readable road IDs to roads.
    pub(crate) road_ids: HashMap<String, RoadId>,
    /// Maps human-readable junction IDs to junctions.
    pub(crate) junction_ids: HashMap<String, JunctionId>,
    /// Limits applied to stream construction and queries.
    pub(crate) config: QueryConfig,
    /// Lane streams built so far, shared between queries.
    pub(crate) cache: StreamCache,
}

impl RoadNetwork {
    /// Gets the query limits.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Replaces the query limits. Cached streams are discarded.
    pub fn set_config(&mut self, config: QueryConfig) {
        self.config = config;
        self.cache.clear();
    }

    /// Gets a reference to the road with the given ID.
    pub fn road(&self, id: RoadId) -> &Road {
        &self.roads[id]
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id]
    }

    /// Gets a reference to the lane with the given ID.
    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id]
    }

    pub fn junction(&self, id: JunctionId) -> &Junction {
        &self.junctions[id]
    }

    pub fn lane_boundary(&self, id: LaneBoundaryId) -> &LaneBoundary {
        &self.boundaries[id]
    }

    pub fn traffic_sign(&self, id: TrafficSignId) -> &TrafficSign {
        &self.traffic_signs[id]
    }

    pub fn road_marking(&self, id: RoadMarkingId) -> &RoadMarking {
        &self.road_markings[id]
    }

    /// Gets the object with the given ID, if it is still in the network.
    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(id)
    }

    /// Looks up a road by its human-readable ID.
    pub fn road_id(&self, od_id: &str) -> Option<RoadId> {
        self.road_ids.get(od_id).copied()
    }

    /// Gets the human-readable ID of a road.
    pub fn road_od_id(&self, id: RoadId) -> &str {
        self.roads[id].od_id()
    }

    /// Looks up a road by its human-readable ID.
    pub fn road_by_od_id(&self, od_id: &str) -> Option<&Road> {
        self.road_id(od_id).map(|id| &self.roads[id])
    }

    /// Looks up a junction by its human-readable ID.
    pub fn junction_by_od_id(&self, od_id: &str) -> Option<&Junction> {
        self.junction_ids.get(od_id).map(|id| &self.junctions[*id])
    }

    /// Returns an iterator over all the roads in the network.
    pub fn iter_roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    /// Returns an iterator over all the lanes in the network.
    pub fn iter_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    /// Returns an iterator over all the junctions in the network.
    pub fn iter_junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }

    /// Returns an iterator over all the objects in the network.
    pub fn iter_objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.values()
    }

    /// Iterates over the lanes of a road, section by section, each section left to right.
    pub(crate) fn road_lanes(&self, road: RoadId) -> impl Iterator<Item = &Lane> {
        self.roads[road]
            .sections
            .iter()
            .flat_map(move |section| self.sections[*section].lanes.iter())
            .map(move |lane| &self.lanes[*lane])
    }

    /// Adds an object to the network. It is not on any lane until it is assigned.
    pub fn add_object(&mut self, kind: ObjectKind, position: ObjectPosition) -> ObjectId {
        self.objects
            .insert_with_key(|id| WorldObject::new(id, kind, position))
    }

    /// Removes an object and all of its lane assignments.
    pub fn remove_object(&mut self, id: ObjectId) {
        if self.objects.remove(id).is_some() {
            for lane in self.lanes.values_mut() {
                lane.remove_object(id);
            }
        }
    }

    /// Replaces the localisation result of an object. Lane assignments are left untouched.
    pub fn set_object_position(&mut self, id: ObjectId, position: ObjectPosition) {
        if let Some(object) = self.objects.get_mut(id) {
            object.position = position;
        }
    }

    /// Removes every object from every lane, ahead of a new localisation pass.
    pub fn clear_object_assignments(&mut self) {
        for lane in self.lanes.values_mut() {
            lane.objects.clear();
        }
    }

    /// Places an object on a lane.
    ///
    /// # Parameters
    /// * `object` - The object to place
    /// * `lane` - The lane it covers
    /// * `overlap` - The covered part of the lane, in road coordinates
    pub fn assign_object(&mut self, object: ObjectId, lane: LaneId, overlap: LaneOverlap) {
        if !self.objects.contains_key(object) {
            log::warn!("cannot assign unknown object {:?} to a lane", object);
            return;
        }
        if let Some(lane) = self.lanes.get_mut(lane) {
            lane.add_object(overlap, object);
        }
    }

    /// Places an object on every lane listed in its touched road intervals.
    pub fn assign_object_from_position(&mut self, object: ObjectId) {
        let Some(position) = self.objects.get(object).map(|o| o.position.clone()) else {
            return;
        };
        let mut assignments = vec![];
        for (road_id, interval) in &position.touched_roads {
            let Some(road) = self.road_id(road_id) else {
                log::warn!("object {:?} touches unknown road {:?}", object, road_id);
                continue;
            };
            for lane in self.road_lanes(road) {
                let bounds = lane.bounds();
                if !interval.lanes.contains(&lane.od_id())
                    || bounds.max < interval.s_start
                    || bounds.min > interval.s_end
                {
                    continue;
                }
                let overlap = LaneOverlap {
                    s_min: interval.s_start.max(bounds.min),
                    s_max: interval.s_end.min(bounds.max),
                };
                assignments.push((lane.id(), overlap));
            }
        }
        for (lane, overlap) in assignments {
            self.lanes[lane].add_object(overlap, object);
        }
    }
}
