use super::{LanesInterval, LongitudinalDistance, RelativeLane};
use crate::stream::{RoadMultiStream, RoadStream, StreamInfo};
use crate::util::Interval;
use crate::{
    GlobalRoadPosition, LaneId, ObjectPosition, RoadGraphVertex, RoadId, RoadNetwork, Section,
};
use std::collections::{BTreeMap, HashMap};

/// Relative lanes collected along one branch of a road stream.
#[derive(Clone, Debug, Default)]
struct RelativeLaneScan {
    intervals: Vec<LanesInterval>,
    /// The lanes of the last section added, by relative ID.
    previous: BTreeMap<i32, LaneId>,
    /// Whether the window has been left.
    done: bool,
    /// The relative ID of the lane of the searched position, once reached.
    target: Option<i32>,
}

/// Computes the ID of `lane` relative to `own`, counting the centre line only once.
fn relative_id(lane: i32, own: i32, in_direction: bool) -> i32 {
    let mut relative = if in_direction { lane - own } else { own - lane };
    if own != 0 && own * lane < 0 {
        relative += if relative > 0 { -1 } else { 1 };
    }
    relative
}

/// The extents of two objects along one branch, once found.
#[derive(Clone, Copy, Debug, Default)]
struct DistanceScan {
    own: Option<Interval<f64>>,
    target: Option<Interval<f64>>,
    own_reference: Option<f64>,
    target_reference: Option<f64>,
}

impl DistanceScan {
    fn distance(&self) -> LongitudinalDistance {
        LongitudinalDistance {
            net_distance: self.own.zip(self.target).map(|(own, target)| own.gap_to(&target)),
            reference_point: self
                .own_reference
                .zip(self.target_reference)
                .map(|(own, target)| target - own),
        }
    }
}

impl RoadNetwork {
    /// Finds the lane continuing the own lane into a new section.
    ///
    /// Returns zero, which matches no lane, if no lane continues it.
    fn next_own_lane(&self, section: &Section, in_direction: bool, previous: &BTreeMap<i32, LaneId>) -> i32 {
        let Some(own) = previous.get(&0) else {
            return 0;
        };
        section
            .lanes()
            .iter()
            .map(|id| self.lane(*id))
            .find(|lane| lane.successors(!in_direction).contains(own))
            .map_or(0, |lane| lane.od_id())
    }

    /// Adds the lanes of one section to the scan.
    fn add_section_lanes(
        &self,
        section: &Section,
        extent: Interval<f64>,
        start: f64,
        own: i32,
        in_direction: bool,
        scan: &mut RelativeLaneScan,
    ) {
        let mut interval = LanesInterval {
            start_s: extent.min - start,
            end_s: extent.max - start,
            lanes: vec![],
        };
        let mut current = BTreeMap::new();
        for lane in section.lanes().iter().map(|id| self.lane(*id)) {
            let relative = relative_id(lane.od_id(), own, in_direction);
            current.insert(relative, lane.id());
            let upstream = lane.successors(!in_direction);
            let predecessor = scan
                .previous
                .iter()
                .find(|(_, id)| upstream.contains(id))
                .map(|(rel, _)| *rel);
            if let (Some(pred), Some(last)) = (predecessor, scan.intervals.last_mut()) {
                if let Some(prev) = last.lanes.iter_mut().find(|l| l.relative_id == pred) {
                    prev.successor = Some(relative);
                }
            }
            interval.lanes.push(RelativeLane {
                relative_id: relative,
                in_driving_direction: if in_direction { lane.od_id() < 0 } else { lane.od_id() > 0 },
                lane_type: lane.lane_type(),
                predecessor,
                successor: None,
            });
        }
        scan.previous = current;
        scan.intervals.push(interval);
    }

    /// Walks the sections of one road of a stream, in stream order.
    fn scan_relative_road(
        &self,
        info: &StreamInfo<RoadId>,
        start: f64,
        own_lane_id: i32,
        range: f64,
        target: Option<&GlobalRoadPosition>,
        scan: &mut RelativeLaneScan,
    ) {
        if scan.done || info.end_s() < start {
            return;
        }
        let road = self.road(info.element);
        let mut sections = road.sections().iter().map(|id| self.section(*id)).collect::<Vec<_>>();
        if !info.in_stream_direction {
            sections.reverse();
        }
        let on_target_road = target.filter(|t| t.road_id == road.od_id());
        for section in sections {
            let bounds = section.bounds();
            let extent = info.stream_interval_of(bounds.min, bounds.max);
            if extent.max < start {
                continue;
            }
            if extent.min > start + range {
                scan.done = true;
                return;
            }
            let own = if scan.previous.is_empty() {
                own_lane_id
            } else {
                self.next_own_lane(section, info.in_stream_direction, &scan.previous)
            };
            self.add_section_lanes(section, extent, start, own, info.in_stream_direction, scan);
            if let Some(target) = on_target_road.filter(|t| section.covers(t.s)) {
                if scan.target.is_none() {
                    scan.target = section
                        .lanes()
                        .iter()
                        .find(|id| self.lane(**id).od_id() == target.lane_id)
                        .map(|_| relative_id(target.lane_id, own, info.in_stream_direction));
                }
            }
        }
    }

    fn finish_relative_lanes(mut intervals: Vec<LanesInterval>, include_oncoming: bool) -> Vec<LanesInterval> {
        if !include_oncoming {
            for interval in &mut intervals {
                interval.lanes.retain(|lane| lane.in_driving_direction);
            }
        }
        intervals
    }

    /// Describes the lanes of every section within `range` m of `start`, relative to the own lane.
    ///
    /// # Parameters
    /// * `stream` - The road stream to follow
    /// * `start` - The stream position of the own object
    /// * `own_lane_id` - The signed ID of the own lane on the first road
    /// * `range` - The distance to look ahead, in m
    /// * `include_oncoming` - Whether to report lanes driven in the opposite direction
    pub fn relative_lanes(
        &self,
        stream: &RoadStream,
        start: f64,
        own_lane_id: i32,
        range: f64,
        include_oncoming: bool,
    ) -> Vec<LanesInterval> {
        let mut scan = RelativeLaneScan::default();
        for info in stream.elements() {
            self.scan_relative_road(info, start, own_lane_id, range, None, &mut scan);
        }
        Self::finish_relative_lanes(scan.intervals, include_oncoming)
    }

    /// Computes [RoadNetwork::relative_lanes] along every branch of a multi-stream.
    pub fn relative_lanes_multi(
        &self,
        stream: &RoadMultiStream,
        start: f64,
        own_lane_id: i32,
        range: f64,
        include_oncoming: bool,
    ) -> HashMap<RoadGraphVertex, Vec<LanesInterval>> {
        stream
            .traverse(RelativeLaneScan::default(), |info, parent| {
                let mut scan = parent.clone();
                self.scan_relative_road(info, start, own_lane_id, range, None, &mut scan);
                scan
            })
            .into_iter()
            .map(|(vertex, scan)| (vertex, Self::finish_relative_lanes(scan.intervals, include_oncoming)))
            .collect()
    }

    /// Finds, on every branch, the relative ID of the lane holding `target`.
    ///
    /// The ID is evaluated in the section containing the target. Branches that
    /// do not reach the target within the search horizon report `None`.
    pub fn relative_lane_id(
        &self,
        stream: &RoadMultiStream,
        start: f64,
        own_lane_id: i32,
        target: &GlobalRoadPosition,
    ) -> HashMap<RoadGraphVertex, Option<i32>> {
        let range = self.config.max_search_length;
        stream
            .traverse(RelativeLaneScan::default(), |info, parent| {
                let mut scan = parent.clone();
                if scan.target.is_none() {
                    self.scan_relative_road(info, start, own_lane_id, range, Some(target), &mut scan);
                }
                scan
            })
            .into_iter()
            .map(|(vertex, scan)| (vertex, scan.target))
            .collect()
    }

    /// Computes the longitudinal distance from one object to another on every branch.
    ///
    /// An object touching several roads of a branch covers the union of its
    /// extents on those roads. Its reference point is taken from the first
    /// road of the branch that holds it. The net distance is the signed gap between the objects, zero if they
    /// overlap; the reference distance is measured between their reference points.
    pub fn distance_between_objects(
        &self,
        stream: &RoadMultiStream,
        own: &ObjectPosition,
        target: &ObjectPosition,
    ) -> HashMap<RoadGraphVertex, LongitudinalDistance> {
        let extent = |info: &StreamInfo<RoadId>, position: &ObjectPosition| {
            position
                .touched_roads
                .get(self.road_od_id(info.element))
                .map(|touched| info.stream_interval_of(touched.s_start, touched.s_end))
        };
        let reference = |info: &StreamInfo<RoadId>, position: &ObjectPosition| {
            position
                .reference_point
                .get(self.road_od_id(info.element))
                .map(|point| info.stream_position_of_road_s(point.s))
        };
        let merge = |found: Option<Interval<f64>>, here: Option<Interval<f64>>| match (found, here) {
            (Some(found), Some(here)) => Some(found.union(&here)),
            (found, here) => found.or(here),
        };
        stream
            .traverse(DistanceScan::default(), |info, parent| DistanceScan {
                own: merge(parent.own, extent(info, own)),
                target: merge(parent.target, extent(info, target)),
                own_reference: parent.own_reference.or_else(|| reference(info, own)),
                target_reference: parent.target_reference.or_else(|| reference(info, target)),
            })
            .into_iter()
            .map(|(vertex, scan)| (vertex, scan.distance()))
            .collect()
    }
}
