use super::{
    IntersectionInfo, Junction, Lane, LaneAttributes, LaneBoundary, Road, RoadLink, RoadMarking,
    RoadNetwork, Section, Side, TrafficSign,
};
use crate::error::{NetworkError, NetworkResult};
use crate::{
    JunctionId, LaneBoundaryId, LaneId, QueryConfig, RoadId, RoadMarkingId, SectionId,
    TrafficSignId,
};
use itertools::Itertools;

/// Assembles a [RoadNetwork] from importer output.
///
/// Every `add_*` call hands out a fresh key. The keys are only meaningful
/// for the network produced by this builder.
#[derive(Default)]
pub struct NetworkBuilder {
    /// The network under construction.
    net: RoadNetwork,
    /// Problems found while adding elements, reported by [NetworkBuilder::build].
    errors: Vec<NetworkError>,
}

impl NetworkBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the query limits of the network.
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.net.config = config;
        self
    }

    /// Adds a road.
    ///
    /// # Parameters
    /// * `od_id` - The human-readable road ID; must be unique
    /// * `in_stream_direction` - Whether the road is driven along its own coordinate
    pub fn add_road(&mut self, od_id: &str, in_stream_direction: bool) -> RoadId {
        let id = self
            .net
            .roads
            .insert_with_key(|id| Road::new(id, od_id.to_owned(), in_stream_direction));
        if self.net.road_ids.insert(od_id.to_owned(), id).is_some() {
            self.errors.push(NetworkError::DuplicateRoad(od_id.to_owned()));
        }
        id
    }

    /// Adds a section to a road.
    ///
    /// # Parameters
    /// * `road` - The road the section belongs to
    /// * `s_start` - The road coordinate at which the section starts, in m
    /// * `length` - The length of the section, in m
    pub fn add_section(&mut self, road: RoadId, s_start: f64, length: f64) -> SectionId {
        let id = self
            .net
            .sections
            .insert_with_key(|id| Section::new(id, road, s_start, length));
        match self.net.roads.get_mut(road) {
            Some(road) => road.sections.push(id),
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
        id
    }

    /// Adds a lane to a section. Lanes must be added from left to right.
    pub fn add_lane(&mut self, section: SectionId, attribs: &LaneAttributes) -> LaneId {
        let Some(sec) = self.net.sections.get(section) else {
            self.errors.push(NetworkError::UnknownLane);
            return LaneId::default();
        };
        let (road, bounds) = (sec.road(), sec.bounds());
        let id = self.net.lanes.insert_with_key(|id| {
            let mut lane = Lane::new(attribs);
            lane.place(id, road, section, bounds);
            lane
        });
        self.net.sections[section].lanes.push(id);
        id
    }

    /// Specifies that the end of the `from` lane connects to the start of the `to` lane.
    pub fn connect_lanes(&mut self, from: LaneId, to: LaneId) {
        self.add_next_lane(from, to);
        self.add_previous_lane(to, from);
    }

    /// Adds a lane to the successors of `lane`, which follow it in its own direction.
    pub fn add_next_lane(&mut self, lane: LaneId, next: LaneId) {
        match self.net.lanes.get_mut(lane) {
            Some(lane) => lane.next.push(next),
            None => self.errors.push(NetworkError::UnknownLane),
        }
    }

    /// Adds a lane to the predecessors of `lane`, which precede it in its own direction.
    pub fn add_previous_lane(&mut self, lane: LaneId, previous: LaneId) {
        match self.net.lanes.get_mut(lane) {
            Some(lane) => lane.previous.push(previous),
            None => self.errors.push(NetworkError::UnknownLane),
        }
    }

    /// Adds a boundary line to one side of a lane.
    pub fn add_lane_boundary(
        &mut self,
        lane: LaneId,
        side: Side,
        boundary: LaneBoundary,
    ) -> LaneBoundaryId {
        let id = self.net.boundaries.insert(boundary);
        match self.net.lanes.get_mut(lane) {
            Some(lane) => match side {
                Side::Left => lane.left_boundaries.push(id),
                Side::Right => lane.right_boundaries.push(id),
            },
            None => self.errors.push(NetworkError::UnknownLane),
        }
        id
    }

    /// Adds a traffic sign which is valid for a lane.
    pub fn add_traffic_sign(&mut self, lane: LaneId, sign: TrafficSign) -> TrafficSignId {
        let id = self.net.traffic_signs.insert(sign);
        match self.net.lanes.get_mut(lane) {
            Some(lane) => lane.traffic_signs.push(id),
            None => self.errors.push(NetworkError::UnknownLane),
        }
        id
    }

    /// Adds a road marking which is valid for a lane.
    pub fn add_road_marking(&mut self, lane: LaneId, marking: RoadMarking) -> RoadMarkingId {
        let id = self.net.road_markings.insert(marking);
        match self.net.lanes.get_mut(lane) {
            Some(lane) => lane.road_markings.push(id),
            None => self.errors.push(NetworkError::UnknownLane),
        }
        id
    }

    /// Sets the element connected to the end of a road.
    pub fn set_road_successor(&mut self, road: RoadId, link: RoadLink) {
        match self.net.roads.get_mut(road) {
            Some(road) => road.successor = link,
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
    }

    /// Sets the element connected to the start of a road.
    pub fn set_road_predecessor(&mut self, road: RoadId, link: RoadLink) {
        match self.net.roads.get_mut(road) {
            Some(road) => road.predecessor = link,
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
    }

    /// Adds a junction.
    pub fn add_junction(&mut self, od_id: &str) -> JunctionId {
        let id = self
            .net
            .junctions
            .insert_with_key(|id| Junction::new(id, od_id.to_owned()));
        if self.net.junction_ids.insert(od_id.to_owned(), id).is_some() {
            self.errors
                .push(NetworkError::DuplicateJunction(od_id.to_owned()));
        }
        id
    }

    /// Makes a road a connecting road of a junction.
    pub fn add_junction_connector(&mut self, junction: JunctionId, road: RoadId) {
        match self.net.junctions.get_mut(junction) {
            Some(junction) => junction.connectors.push(road),
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
    }

    /// Specifies that traffic on connector `high` has right of way over traffic on `low`.
    pub fn add_junction_priority(&mut self, junction: JunctionId, high: RoadId, low: RoadId) {
        match self.net.junctions.get_mut(junction) {
            Some(junction) => junction.priorities.push((high, low)),
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
    }

    /// Records where another connector crosses `connector`.
    pub fn add_junction_intersection(
        &mut self,
        junction: JunctionId,
        connector: RoadId,
        info: IntersectionInfo,
    ) {
        match self.net.junctions.get_mut(junction) {
            Some(junction) => junction
                .intersections
                .entry(connector)
                .or_default()
                .push(info),
            None => self.errors.push(NetworkError::UnknownLinkTarget),
        }
    }

    /// Validates the network and freezes its structure.
    pub fn build(mut self) -> NetworkResult<RoadNetwork> {
        if let Some(err) = self.errors.first().cloned() {
            return Err(err);
        }
        self.finish_roads()?;
        self.check_lane_links()?;
        self.link_junctions()?;
        self.check_road_links()?;
        self.check_lane_link_targets()?;
        log::debug!(
            "built road network with {} roads, {} lanes and {} junctions",
            self.net.roads.len(),
            self.net.lanes.len(),
            self.net.junctions.len()
        );
        Ok(self.net)
    }

    /// Orders the sections of each road, checks them and derives lane neighbours.
    fn finish_roads(&mut self) -> NetworkResult<()> {
        let net = &mut self.net;
        for road in net.roads.values_mut() {
            if road.sections.is_empty() {
                return Err(NetworkError::EmptyRoad(road.od_id().to_owned()));
            }
            road.sections.sort_by(|a, b| {
                net.sections[*a]
                    .bounds()
                    .min
                    .total_cmp(&net.sections[*b].bounds().min)
            });
            let mut s = 0.0;
            for section in &road.sections {
                let section = &net.sections[*section];
                let bounds = section.bounds();
                if bounds.length().is_nan() || bounds.length() <= 0.0 {
                    return Err(NetworkError::NonPositiveSectionLength {
                        road: road.od_id().to_owned(),
                        s: bounds.min,
                    });
                }
                if (bounds.min - s).abs() > 1e-6 {
                    return Err(NetworkError::NonContiguousSections {
                        road: road.od_id().to_owned(),
                        s: bounds.min,
                    });
                }
                if section.lanes.is_empty() {
                    return Err(NetworkError::EmptySection {
                        road: road.od_id().to_owned(),
                        s: bounds.min,
                    });
                }
                if let Some(lane) = section
                    .lanes
                    .iter()
                    .map(|id| net.lanes[*id].od_id())
                    .duplicates()
                    .next()
                {
                    return Err(NetworkError::DuplicateLane {
                        road: road.od_id().to_owned(),
                        lane,
                    });
                }
                s = bounds.max;
            }
            road.length = s;
        }

        for section in net.sections.values() {
            for (left, right) in section.lanes.iter().tuple_windows() {
                net.lanes[*left].right = Some(*right);
                net.lanes[*right].left = Some(*left);
            }
        }
        Ok(())
    }

    fn check_lane_links(&self) -> NetworkResult<()> {
        let lanes = &self.net.lanes;
        let dangling = lanes
            .values()
            .flat_map(|lane| lane.next.iter().chain(lane.previous.iter()))
            .any(|id| !lanes.contains_key(*id));
        if dangling {
            return Err(NetworkError::UnknownLane);
        }
        Ok(())
    }

    /// Points every connector back at its junction and checks the junction tables.
    fn link_junctions(&mut self) -> NetworkResult<()> {
        let net = &mut self.net;
        for junction in net.junctions.values() {
            let not_a_connector = |road: RoadId| NetworkError::NotAConnector {
                junction: junction.od_id().to_owned(),
                road: net
                    .roads
                    .get(road)
                    .map_or_else(String::new, |r| r.od_id().to_owned()),
            };
            for connector in &junction.connectors {
                if !net.roads.contains_key(*connector) {
                    return Err(NetworkError::UnknownLinkTarget);
                }
            }
            let is_connector = |road: &RoadId| junction.connectors.contains(road);
            for (high, low) in &junction.priorities {
                if let Some(road) = [*high, *low].into_iter().find(|r| !is_connector(r)) {
                    return Err(not_a_connector(road));
                }
            }
            for (connector, infos) in &junction.intersections {
                if !is_connector(connector) {
                    return Err(not_a_connector(*connector));
                }
                for info in infos {
                    if !is_connector(&info.intersecting_road) {
                        return Err(not_a_connector(info.intersecting_road));
                    }
                    let unknown_lane = info
                        .s_offsets
                        .keys()
                        .any(|(a, b)| !net.lanes.contains_key(*a) || !net.lanes.contains_key(*b));
                    if unknown_lane {
                        return Err(NetworkError::UnknownLane);
                    }
                }
            }
        }
        for junction in net.junctions.values() {
            for connector in &junction.connectors {
                net.roads[*connector].junction = Some(junction.id());
            }
        }
        Ok(())
    }

    fn check_road_links(&self) -> NetworkResult<()> {
        let net = &self.net;
        let valid = |link: RoadLink| match link {
            RoadLink::Road(id) => net.roads.contains_key(id),
            RoadLink::Junction(id) => net.junctions.contains_key(id),
            RoadLink::None => true,
        };
        let all_valid = net
            .roads
            .values()
            .all(|road| valid(road.successor) && valid(road.predecessor));
        if !all_valid {
            return Err(NetworkError::UnknownLinkTarget);
        }
        Ok(())
    }

    /// Checks that lanes only continue onto roads their road is linked to.
    ///
    /// Links into the same road are always allowed, as are links from a
    /// road whose successor or predecessor is not set.
    fn check_lane_link_targets(&self) -> NetworkResult<()> {
        let net = &self.net;
        let leads_to = |link: RoadLink, target: RoadId| match link {
            RoadLink::Road(id) => id == target,
            RoadLink::Junction(id) => net.junctions[id].connectors.contains(&target),
            RoadLink::None => true,
        };
        for lane in net.lanes.values() {
            let road = &net.roads[lane.road()];
            let targets = lane
                .next
                .iter()
                .map(|id| (road.successor, *id))
                .chain(lane.previous.iter().map(|id| (road.predecessor, *id)));
            for (link, target) in targets {
                let target = net.lanes[target].road();
                if target != lane.road() && !leads_to(link, target) {
                    return Err(NetworkError::LaneLinkMismatch {
                        road: road.od_id().to_owned(),
                        lane: lane.od_id(),
                        target: net.roads[target].od_id().to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}
