use super::{
    IntersectingConnection, JunctionConnection, JunctionPriority, RelativeJunction,
    RoadNetworkElement, RoadNetworkElementType,
};
use crate::route::{Route, RouteElement};
use crate::stream::{RoadMultiStream, RoadStream, StreamInfo};
use crate::util::Interval;
use crate::{
    Junction, LaneType, ObjectId, ObjectPosition, ObjectType, RoadGraphVertex, RoadId, RoadLink,
    RoadNetwork,
};
use std::collections::{HashMap, HashSet};

impl RoadNetwork {
    /// Gets the junction a connecting road belongs to.
    pub fn junction_of_connector(&self, connector: &str) -> Option<&Junction> {
        self.road_by_od_id(connector)?
            .junction()
            .map(|id| self.junction(id))
    }

    /// Lists the connectors crossing `connector`, with their priority relative to it.
    pub fn intersecting_connections(&self, connector: &str) -> Vec<IntersectingConnection> {
        let (Some(junction), Some(road)) = (self.junction_of_connector(connector), self.road_id(connector)) else {
            return vec![];
        };
        junction
            .intersections(road)
            .iter()
            .map(|info| IntersectingConnection {
                road_id: self.road_od_id(info.intersecting_road).to_owned(),
                rank: info.relative_rank,
            })
            .collect()
    }

    /// Lists the (high priority, low priority) connector pairs of a junction.
    pub fn priorities_on_junction(&self, junction: &str) -> Vec<JunctionPriority> {
        self.junction_by_od_id(junction)
            .map(|junction| {
                junction
                    .priorities()
                    .iter()
                    .map(|(high, low)| JunctionPriority {
                        high: self.road_od_id(*high).to_owned(),
                        low: self.road_od_id(*low).to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lists the ways through a junction for traffic arriving on `incoming_road`.
    pub fn connections_on_junction(&self, junction: &str, incoming_road: &str) -> Vec<JunctionConnection> {
        let (Some(junction), Some(incoming)) = (self.junction_by_od_id(junction), self.road_id(incoming_road)) else {
            return vec![];
        };
        junction
            .connectors()
            .iter()
            .map(|id| self.road(*id))
            .filter(|connector| connector.predecessor() == RoadLink::Road(incoming))
            .filter_map(|connector| {
                let RoadLink::Road(outgoing) = connector.successor() else {
                    return None;
                };
                let outgoing = self.road(outgoing);
                let entry = if outgoing.in_stream_direction() {
                    outgoing.predecessor()
                } else {
                    outgoing.successor()
                };
                Some(JunctionConnection {
                    connecting_road_id: connector.od_id().to_owned(),
                    outgoing_road_id: outgoing.od_id().to_owned(),
                    outgoing_stream_direction: entry == RoadLink::Junction(junction.id()),
                })
            })
            .collect()
    }

    fn link_element(&self, link: RoadLink) -> RoadNetworkElement {
        match link {
            RoadLink::Road(id) => RoadNetworkElement {
                element_type: RoadNetworkElementType::Road,
                id: self.road_od_id(id).to_owned(),
            },
            RoadLink::Junction(id) => RoadNetworkElement {
                element_type: RoadNetworkElementType::Junction,
                id: self.junction(id).od_id().to_owned(),
            },
            RoadLink::None => RoadNetworkElement::none(),
        }
    }

    /// Gets the road or junction at the end of a road.
    pub fn road_successor(&self, road_id: &str) -> RoadNetworkElement {
        self.road_by_od_id(road_id)
            .map_or_else(RoadNetworkElement::none, |road| self.link_element(road.successor()))
    }

    /// Gets the road or junction at the start of a road.
    pub fn road_predecessor(&self, road_id: &str) -> RoadNetworkElement {
        self.road_by_od_id(road_id)
            .map_or_else(RoadNetworkElement::none, |road| self.link_element(road.predecessor()))
    }

    /// Builds the route that reaches a connector through its incoming road.
    ///
    /// The route runs back from the incoming road over plain road links for as
    /// long as there are any, and ends with the connector itself.
    pub fn route_leading_to_connector(&self, connector: &str) -> Route {
        let last = RouteElement::new(connector, true);
        let Some(road) = self.road_by_od_id(connector) else {
            return Route::new(vec![last]);
        };
        let RoadLink::Road(incoming) = road.predecessor() else {
            log::warn!("connector {:?} has no incoming road", connector);
            return Route::new(vec![last]);
        };
        let leads_to_junction = match road.junction() {
            Some(junction) => self.road(incoming).successor() == RoadLink::Junction(junction),
            None => self.road(incoming).successor() == RoadLink::Road(road.id()),
        };

        let mut roads = vec![RouteElement::new(self.road_od_id(incoming), leads_to_junction)];
        let mut visited = HashSet::from([road.id(), incoming]);
        let mut current = incoming;
        loop {
            let link = if leads_to_junction {
                self.road(current).predecessor()
            } else {
                self.road(current).successor()
            };
            match link {
                RoadLink::Road(prev) if visited.insert(prev) => {
                    roads.push(RouteElement::new(self.road_od_id(prev), leads_to_junction));
                    current = prev;
                }
                _ => break,
            }
        }
        roads.reverse();
        roads.push(last);
        Route::new(roads)
    }

    /// Lists the moving objects on the last `range` m before the end of a connector,
    /// including those still on the road leading to it.
    pub fn moving_objects_in_range_of_junction_connection(&self, connector: &str, range: f64) -> Vec<ObjectId> {
        let Some(road) = self.road_id(connector) else {
            return vec![];
        };
        let route = self.route_leading_to_connector(connector);
        let mut found = vec![];
        for lane in self.lanes_of_lane_type_at_distance(connector, 0.0, &[LaneType::Driving]) {
            let stream = self.create_lane_stream(&route, connector, lane.od_id(), 0.0);
            let Some(end) = stream
                .elements()
                .iter()
                .filter(|info| self.lane(info.element).road() == road)
                .map(StreamInfo::end_s)
                .reduce(f64::max)
            else {
                continue;
            };
            for id in self.objects_in_range(&stream, end - range, end, ObjectType::Moving) {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Places an object and a conflict zone on the lane stream leading into the own connector.
    ///
    /// Returns the stream intervals of (object, conflict zone).
    fn conflict_zone_ahead(
        &self,
        position: &ObjectPosition,
        intersecting_connector: &str,
        intersecting_lane_id: i32,
        own_connector: &str,
    ) -> Option<(Interval<f64>, Interval<f64>)> {
        let intersecting = self.road_id(intersecting_connector)?;
        let own = self.road_id(own_connector)?;
        let info = self
            .junction_of_connector(intersecting_connector)?
            .intersections(intersecting)
            .iter()
            .find(|info| info.intersecting_road == own)?;

        let route = self.route_leading_to_connector(own_connector);
        let locate = route
            .roads
            .iter()
            .rev()
            .find_map(|e| position.main_locate_point.get(&e.road_id))?;
        let touched = position.touched_roads.get(&locate.road_id)?;
        let object_lane = self.lane_by_od_id(&locate.road_id, locate.lane_id, locate.s);
        if !object_lane.exists() {
            return None;
        }
        let stream = self.create_lane_stream(&route, &locate.road_id, locate.lane_id, locate.s);
        let object = Interval::spanning(
            stream.position_by_element_and_s(object_lane.id(), touched.s_start)?,
            stream.position_by_element_and_s(object_lane.id(), touched.s_end)?,
        );

        let own_lane = stream
            .elements()
            .iter()
            .rev()
            .find(|e| self.lane(e.element).road() == own)?;
        let intersecting_lane = self.lane_by_od_id(intersecting_connector, intersecting_lane_id, 0.0);
        let zone = info.s_offsets.get(&(intersecting_lane.id(), own_lane.element))?;
        Some((object, own_lane.stream_interval_of(zone.min, zone.max)))
    }

    /// Computes how far an object on or before `own_connector` travels until its
    /// front reaches the zone where `intersecting_connector` crosses it.
    ///
    /// Returns `f64::MAX` if the connectors do not cross or the object cannot be placed.
    pub fn distance_until_object_enters_connector(
        &self,
        position: &ObjectPosition,
        intersecting_connector: &str,
        intersecting_lane_id: i32,
        own_connector: &str,
    ) -> f64 {
        self.conflict_zone_ahead(position, intersecting_connector, intersecting_lane_id, own_connector)
            .map_or(f64::MAX, |(object, zone)| zone.min - object.max)
    }

    /// Computes how far an object on or before `own_connector` travels until its
    /// rear leaves the zone where `intersecting_connector` crosses it.
    ///
    /// Returns `f64::MAX` if the connectors do not cross or the object cannot be placed.
    pub fn distance_until_object_leaves_connector(
        &self,
        position: &ObjectPosition,
        intersecting_connector: &str,
        intersecting_lane_id: i32,
        own_connector: &str,
    ) -> f64 {
        self.conflict_zone_ahead(position, intersecting_connector, intersecting_lane_id, own_connector)
            .map_or(f64::MAX, |(object, zone)| zone.max - object.min)
    }

    fn relative_junction(&self, info: &StreamInfo<RoadId>, start: f64, range: f64) -> Option<RelativeJunction> {
        let road = self.road(info.element);
        road.junction()?;
        Some(RelativeJunction {
            start_s: info.start_s().max(start) - start,
            end_s: info.end_s().min(start + range) - start,
            connecting_road: road.od_id().to_owned(),
        })
    }

    /// Lists the junction connectors within `range` m of `start`, clipped to the window.
    pub fn relative_junctions(&self, stream: &RoadStream, start: f64, range: f64) -> Vec<RelativeJunction> {
        stream
            .elements()
            .iter()
            .skip_while(|info| info.end_s() < start)
            .take_while(|info| info.start_s() <= start + range)
            .filter_map(|info| self.relative_junction(info, start, range))
            .collect()
    }

    /// Lists [RoadNetwork::relative_junctions] along every branch of a multi-stream.
    pub fn relative_junctions_multi(
        &self,
        stream: &RoadMultiStream,
        start: f64,
        range: f64,
    ) -> HashMap<RoadGraphVertex, Vec<RelativeJunction>> {
        stream.traverse(vec![], |info, parent: &Vec<RelativeJunction>| {
            let mut junctions = parent.clone();
            if info.end_s() >= start && info.start_s() <= start + range {
                junctions.extend(self.relative_junction(info, start, range));
            }
            junctions
        })
    }

    /// Finds the first junction of the route at or after the road the object is on.
    pub fn next_junction_id_on_route(&self, route: &Route, position: &ObjectPosition) -> Option<String> {
        let start = route
            .roads
            .iter()
            .position(|e| position.touched_roads.contains_key(&e.road_id))?;
        route.roads[start..].iter().find_map(|e| {
            let road = self.road_id(&e.road_id)?;
            route
                .junctions
                .iter()
                .find(|id| {
                    self.junction_by_od_id(id)
                        .map_or(false, |j| j.connectors().contains(&road))
                })
                .cloned()
        })
    }

    /// Computes the distance along the route from an object to the first connector of a junction.
    ///
    /// Returns `f64::MAX` if the route does not pass the junction.
    pub fn distance_to_junction(&self, route: &Route, position: &ObjectPosition, junction: &str) -> f64 {
        if !route.junctions.iter().any(|id| id == junction) {
            return f64::MAX;
        }
        let Some(junction) = self.junction_by_od_id(junction) else {
            return f64::MAX;
        };
        let stream = self.create_road_stream(route);
        let Some(connector) = stream
            .elements()
            .iter()
            .find(|info| junction.connectors().contains(&info.element))
        else {
            return f64::MAX;
        };
        let object = route.roads.iter().find_map(|e| {
            let locate = position.main_locate_point.get(&e.road_id)?;
            stream.position_by_element_and_s(self.road_id(&e.road_id)?, locate.s)
        });
        object.map_or(f64::MAX, |s| connector.start_s() - s)
    }
}
