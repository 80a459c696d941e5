use crate::stream::{LaneMultiStream, LaneStream, StreamInfo};
use crate::{LaneId, ObjectId, ObjectType, RoadGraphVertex, RoadNetwork};
use std::collections::HashMap;

impl RoadNetwork {
    /// Lists the objects on a stream lane that lie within `(from, to)`, nearest first.
    ///
    /// An object is within the range if its far end is beyond `from` and its
    /// near end is before `to`. Returns (near end, object) pairs in stream positions.
    fn lane_objects_in_range(
        &self,
        info: &StreamInfo<LaneId>,
        from: f64,
        to: f64,
        filter: ObjectType,
    ) -> Vec<(f64, ObjectId)> {
        let mut found = self
            .lane(info.element)
            .objects()
            .iter()
            .filter(|(_, id)| {
                self.object(*id)
                    .map_or(false, |object| filter.matches(object.kind()))
            })
            .map(|(overlap, id)| (info.stream_interval_of(overlap.s_min, overlap.s_max), *id))
            .filter(|(extent, _)| extent.max > from && extent.min < to)
            .map(|(extent, id)| (extent.min, id))
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found
    }

    /// Lists the objects within `(from, to)` along a stream, ordered by stream position.
    ///
    /// An object covering several lanes of the stream is listed once.
    pub fn objects_in_range(&self, stream: &LaneStream, from: f64, to: f64, filter: ObjectType) -> Vec<ObjectId> {
        let mut found = vec![];
        for info in stream.elements() {
            if info.end_s() < from {
                continue;
            }
            if info.start_s() > to {
                break;
            }
            for (_, id) in self.lane_objects_in_range(info, from, to, filter) {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Lists the objects within `(from, to)` along every branch of a multi-stream.
    pub fn objects_in_range_multi(
        &self,
        stream: &LaneMultiStream,
        from: f64,
        to: f64,
        filter: ObjectType,
    ) -> HashMap<RoadGraphVertex, Vec<ObjectId>> {
        stream.traverse(vec![], |info, parent: &Vec<ObjectId>| {
            let mut found = parent.clone();
            if info.end_s() < from || info.start_s() > to {
                return found;
            }
            for (_, id) in self.lane_objects_in_range(info, from, to, filter) {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
            found
        })
    }

    /// Finds the nearest object ahead of `start`, no further away than `range`.
    pub fn next_object_in_lane(
        &self,
        stream: &LaneStream,
        start: f64,
        range: f64,
        filter: ObjectType,
    ) -> Option<ObjectId> {
        stream
            .elements()
            .iter()
            .skip_while(|info| info.end_s() < start)
            .take_while(|info| info.start_s() <= start + range)
            .find_map(|info| {
                self.lane_objects_in_range(info, start, start + range, filter)
                    .first()
                    .map(|(_, id)| *id)
            })
    }

    /// Finds the furthest object ahead of `start`, no further away than `range`.
    pub fn last_object_in_lane(
        &self,
        stream: &LaneStream,
        start: f64,
        range: f64,
        filter: ObjectType,
    ) -> Option<ObjectId> {
        stream
            .elements()
            .iter()
            .rev()
            .skip_while(|info| info.start_s() > start + range)
            .take_while(|info| info.end_s() >= start)
            .find_map(|info| {
                self.lane_objects_in_range(info, start, start + range, filter)
                    .last()
                    .map(|(_, id)| *id)
            })
    }

    /// Finds [RoadNetwork::next_object_in_lane] on every branch of a multi-stream.
    pub fn next_object_in_lane_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        range: f64,
        filter: ObjectType,
    ) -> HashMap<RoadGraphVertex, Option<ObjectId>> {
        stream.traverse(None, |info, parent| {
            parent.or_else(|| {
                self.lane_objects_in_range(info, start, start + range, filter)
                    .first()
                    .map(|(_, id)| *id)
            })
        })
    }

    /// Finds [RoadNetwork::last_object_in_lane] on every branch of a multi-stream.
    pub fn last_object_in_lane_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        range: f64,
        filter: ObjectType,
    ) -> HashMap<RoadGraphVertex, Option<ObjectId>> {
        stream.traverse(None, |info, parent| {
            self.lane_objects_in_range(info, start, start + range, filter)
                .last()
                .map(|(_, id)| *id)
                .or(*parent)
        })
    }
}
