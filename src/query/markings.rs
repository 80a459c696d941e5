use crate::error::{NetworkError, NetworkResult};
use crate::stream::{LaneMultiStream, LaneStream, StreamInfo};
use crate::util::Interval;
use crate::{
    BoundarySide, LaneId, LaneMarkingEntity, LaneMarkingType, RoadGraphVertex, RoadMarkingEntity,
    RoadNetwork, Side, TrafficSignEntity,
};
use std::collections::HashMap;

/// Lane markings found so far, with the halves of double lines still waiting for their partner.
#[derive(Clone, Debug, Default)]
struct MarkingScan {
    found: Vec<LaneMarkingEntity>,
    pending: Vec<(BoundarySide, LaneMarkingEntity)>,
}

/// The stream positions searched for a `range` measured from `start`; `range` may be negative.
fn window(start: f64, range: f64) -> Interval<f64> {
    Interval::spanning(start, start + range)
}

fn lane_in_window(info: &StreamInfo<LaneId>, window: &Interval<f64>) -> bool {
    info.end_s() >= window.min && info.start_s() <= window.max
}

impl RoadNetwork {
    /// Adds the boundaries on one side of a stream lane that lie within the window.
    fn scan_lane_markings(
        &self,
        info: &StreamInfo<LaneId>,
        start: f64,
        range: f64,
        side: Side,
        scan: &mut MarkingScan,
    ) -> NetworkResult<()> {
        let window = window(start, range);
        for id in self.lane(info.element).boundaries(side) {
            let boundary = self.lane_boundary(*id);
            let extent = info.stream_interval_of(boundary.s_start, boundary.s_end);
            if !extent.touches(&window) {
                continue;
            }
            let entity = LaneMarkingEntity {
                relative_start_distance: extent.min - start,
                width: boundary.width,
                marking_type: boundary.marking_type,
                color: boundary.color,
            };
            if boundary.side == BoundarySide::Single {
                scan.found.push(entity);
                continue;
            }
            let partner = scan
                .pending
                .iter()
                .position(|(_, other)| other.relative_start_distance == entity.relative_start_distance);
            let Some(idx) = partner else {
                scan.pending.push((boundary.side, entity));
                continue;
            };
            let (_, other) = scan.pending.remove(idx);
            let (left, right) = if boundary.side == BoundarySide::Left {
                (entity, other)
            } else {
                (other, entity)
            };
            let marking_type = LaneMarkingType::combine(left.marking_type, right.marking_type).ok_or(
                NetworkError::InvalidDoubleMarking {
                    left: left.marking_type,
                    right: right.marking_type,
                },
            )?;
            scan.found.push(LaneMarkingEntity { marking_type, ..left });
        }
        Ok(())
    }

    /// Lists the lane markings on one side of the stream within `range` m of `start`.
    ///
    /// The two lines of a double marking are reported as a single combined marking.
    ///
    /// # Errors
    /// [NetworkError::InvalidDoubleMarking] if the lines of a double marking cannot be combined.
    pub fn lane_markings(
        &self,
        stream: &LaneStream,
        start: f64,
        range: f64,
        side: Side,
    ) -> NetworkResult<Vec<LaneMarkingEntity>> {
        let window = window(start, range);
        let mut scan = MarkingScan::default();
        for info in stream.elements() {
            if info.end_s() < window.min {
                continue;
            }
            if info.start_s() > window.max {
                break;
            }
            self.scan_lane_markings(info, start, range, side, &mut scan)?;
        }
        Ok(scan.found)
    }

    /// Lists [RoadNetwork::lane_markings] along every branch of a multi-stream.
    pub fn lane_markings_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        range: f64,
        side: Side,
    ) -> NetworkResult<HashMap<RoadGraphVertex, Vec<LaneMarkingEntity>>> {
        let window = window(start, range);
        stream
            .traverse(Ok(MarkingScan::default()), |info, parent: &NetworkResult<MarkingScan>| {
                let mut scan = parent.clone()?;
                if lane_in_window(info, &window) {
                    self.scan_lane_markings(info, start, range, side, &mut scan)?;
                }
                Ok(scan)
            })
            .into_iter()
            .map(|(vertex, scan)| scan.map(|scan| (vertex, scan.found)))
            .collect()
    }

    fn lane_traffic_signs(&self, info: &StreamInfo<LaneId>, start: f64, range: f64) -> Vec<TrafficSignEntity> {
        let window = window(start, range) - start;
        let mut signs = self
            .lane(info.element)
            .traffic_signs()
            .iter()
            .map(|id| self.traffic_sign(*id))
            .map(|sign| (info.stream_position_of_road_s(sign.s) - start, sign))
            .filter(|(distance, _)| window.contains(*distance))
            .collect::<Vec<_>>();
        signs.sort_by(|a, b| a.0.total_cmp(&b.0));
        signs
            .into_iter()
            .map(|(distance, sign)| sign.entity(distance))
            .collect()
    }

    fn lane_road_markings(&self, info: &StreamInfo<LaneId>, start: f64, range: f64) -> Vec<RoadMarkingEntity> {
        let window = window(start, range) - start;
        let mut markings = self
            .lane(info.element)
            .road_markings()
            .iter()
            .map(|id| self.road_marking(*id))
            .map(|marking| (info.stream_position_of_road_s(marking.s) - start, marking))
            .filter(|(distance, _)| window.contains(*distance))
            .collect::<Vec<_>>();
        markings.sort_by(|a, b| a.0.total_cmp(&b.0));
        markings
            .into_iter()
            .map(|(distance, marking)| marking.entity(distance))
            .collect()
    }

    /// Lists the traffic signs within `range` m of `start`, relative to `start`.
    ///
    /// A negative `range` searches behind `start`.
    pub fn traffic_signs_in_range(&self, stream: &LaneStream, start: f64, range: f64) -> Vec<TrafficSignEntity> {
        let window = window(start, range);
        stream
            .elements()
            .iter()
            .filter(|info| lane_in_window(info, &window))
            .flat_map(|info| self.lane_traffic_signs(info, start, range))
            .collect()
    }

    /// Lists [RoadNetwork::traffic_signs_in_range] along every branch of a multi-stream.
    pub fn traffic_signs_in_range_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        range: f64,
    ) -> HashMap<RoadGraphVertex, Vec<TrafficSignEntity>> {
        let window = window(start, range);
        stream.traverse(vec![], |info, parent: &Vec<TrafficSignEntity>| {
            let mut signs = parent.clone();
            if lane_in_window(info, &window) {
                signs.extend(self.lane_traffic_signs(info, start, range));
            }
            signs
        })
    }

    /// Lists the road markings within `range` m of `start`, relative to `start`.
    ///
    /// A negative `range` searches behind `start`.
    pub fn road_markings_in_range(&self, stream: &LaneStream, start: f64, range: f64) -> Vec<RoadMarkingEntity> {
        let window = window(start, range);
        stream
            .elements()
            .iter()
            .filter(|info| lane_in_window(info, &window))
            .flat_map(|info| self.lane_road_markings(info, start, range))
            .collect()
    }

    /// Lists [RoadNetwork::road_markings_in_range] along every branch of a multi-stream.
    pub fn road_markings_in_range_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        range: f64,
    ) -> HashMap<RoadGraphVertex, Vec<RoadMarkingEntity>> {
        let window = window(start, range);
        stream.traverse(vec![], |info, parent: &Vec<RoadMarkingEntity>| {
            let mut markings = parent.clone();
            if lane_in_window(info, &window) {
                markings.extend(self.lane_road_markings(info, start, range));
            }
            markings
        })
    }
}
