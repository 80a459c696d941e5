use super::{LaneMultiStream, LaneStream, MultiStream, MultiStreamNode, RoadMultiStream, RoadStream, Stream, StreamInfo};
use crate::config::BranchTieBreak;
use crate::route::{RoadGraph, RoadGraphVertex, Route};
use crate::{Lane, LaneId, RoadId, RoadNetwork};
use std::collections::HashSet;
use std::sync::Arc;

impl RoadNetwork {
    /// Builds the stream of lanes followed along a route, passing through a lane.
    ///
    /// The stream begins at the most upstream lane that still lies on the route
    /// and leads to the start lane. Past the end of the route it continues onto
    /// the first available successor until the search horizon is reached.
    /// Streams are cached: every later request for a lane of the same stream
    /// with the same route returns the same [Arc].
    ///
    /// # Parameters
    /// * `route` - The route to follow
    /// * `road_id` - The human-readable ID of the start road
    /// * `lane_id` - The signed ID of the start lane
    /// * `s` - The road coordinate of the start position
    pub fn create_lane_stream(&self, route: &Route, road_id: &str, lane_id: i32, s: f64) -> Arc<LaneStream> {
        if let Some(stream) = self.cache.get(route, road_id, lane_id, s) {
            return stream;
        }
        let stream = Arc::new(self.build_lane_stream(route, road_id, lane_id, s));
        for info in stream.elements() {
            let lane = self.lane(info.element);
            self.cache.insert(
                route,
                self.road_od_id(lane.road()),
                lane.od_id(),
                lane.bounds(),
                stream.clone(),
            );
        }
        log::debug!(
            "built lane stream of {} lanes from lane {} of road {:?}",
            stream.elements().len(),
            lane_id,
            road_id
        );
        #[cfg(feature = "debug")]
        crate::debug::debug_stream("lane_stream", &stream);
        stream
    }

    fn build_lane_stream(&self, route: &Route, road_id: &str, lane_id: i32, s: f64) -> LaneStream {
        let start = self.lane_by_od_id(road_id, lane_id, s);
        if !start.exists() {
            log::warn!("no lane {} on road {:?} at s = {}", lane_id, road_id, s);
            return Stream::default();
        }
        let Some(idx) = route.roads.iter().rposition(|e| e.road_id == road_id) else {
            log::warn!("road {:?} is not part of the route", road_id);
            return Stream::default();
        };
        let (mut lane, mut idx) = self.originating_route_lane(route, start, idx);
        let mut dir = route.roads[idx].in_road_direction;

        let mut elements = vec![];
        let mut visited = HashSet::new();
        let mut length = 0.0;
        let mut off_route = 0.0;
        while visited.insert(lane.id()) {
            elements.push(StreamInfo::new(lane.id(), length, dir, lane.length(), lane.road_start()));
            length += lane.length();
            if idx >= route.roads.len() {
                off_route += lane.length();
                if off_route >= self.config.max_search_length {
                    break;
                }
            }

            let candidates = lane.successors(dir);
            let next = match self.pick_lane_on_road(candidates, lane.road(), lane) {
                Some(next) => Some((next, dir)),
                None => {
                    idx = (idx + 1).min(route.roads.len());
                    match route.roads.get(idx) {
                        Some(element) => self
                            .road_id(&element.road_id)
                            .and_then(|road| self.pick_lane_on_road(candidates, road, lane))
                            .map(|next| (next, element.in_road_direction)),
                        None => candidates.first().map(|next| {
                            let along = self.lane(*next).previous().contains(&lane.id());
                            (*next, along)
                        }),
                    }
                }
            };
            let Some((next, next_dir)) = next else {
                break;
            };
            lane = self.lane(next);
            dir = next_dir;
        }
        Stream::new(elements)
    }

    /// Walks upstream from `start` for as long as the predecessors stay on the route.
    ///
    /// Returns the most upstream lane along with the index of its road in the route.
    fn originating_route_lane<'a>(&'a self, route: &Route, start: &'a Lane, idx: usize) -> (&'a Lane, usize) {
        let mut lane = start;
        let mut idx = idx;
        let mut visited = HashSet::from([start.id()]);
        loop {
            let dir = route.roads[idx].in_road_direction;
            let upstream = lane.successors(!dir);
            if upstream.is_empty() {
                break;
            }
            let on_route_road = |idx: usize| {
                self.road_id(&route.roads[idx].road_id)
                    .and_then(|road| self.pick_lane_on_road(upstream, road, lane))
            };
            let found = match on_route_road(idx) {
                Some(prev) => Some((prev, idx)),
                None if idx > 0 => on_route_road(idx - 1).map(|prev| (prev, idx - 1)),
                None => None,
            };
            match found {
                Some((prev, prev_idx)) if visited.insert(prev) => {
                    lane = self.lane(prev);
                    idx = prev_idx;
                }
                _ => break,
            }
        }
        (lane, idx)
    }

    /// Picks the lane on `road` out of several candidate successors of `current`.
    pub(crate) fn pick_lane_on_road(&self, candidates: &[LaneId], road: RoadId, current: &Lane) -> Option<LaneId> {
        match self.config.tie_break {
            BranchTieBreak::FirstInLaneOrder => self
                .road_lanes(road)
                .find(|lane| candidates.contains(&lane.id()))
                .map(|lane| lane.id()),
            BranchTieBreak::ClosestLaneId => candidates
                .iter()
                .filter(|id| self.lane(**id).road() == road)
                .min_by_key(|id| (self.lane(**id).od_id() - current.od_id()).abs())
                .copied(),
        }
    }

    /// Builds the stream of roads along a route.
    pub fn create_road_stream(&self, route: &Route) -> RoadStream {
        let mut length = 0.0;
        let elements = route
            .roads
            .iter()
            .filter_map(|element| {
                let road = self.road_by_od_id(&element.road_id)?;
                let info = StreamInfo::new(road.id(), length, element.in_road_direction, road.length(), 0.0);
                length += road.length();
                Some(info)
            })
            .collect();
        Stream::new(elements)
    }

    /// Builds the tree of lanes reachable from a lane, branching along the road graph.
    ///
    /// The root holds the start lane at stream position zero. A lane continuing on
    /// the same road keeps the vertex; otherwise each outgoing edge of the vertex
    /// gets a child holding the successor lane on that edge's road, or no lane if
    /// there is none.
    ///
    /// # Parameters
    /// * `graph` - The road graph to branch along
    /// * `start` - The vertex of the start road
    /// * `lane_id` - The signed ID of the start lane
    /// * `s` - The road coordinate of the start position
    pub fn create_lane_multi_stream(
        &self,
        graph: &RoadGraph,
        start: RoadGraphVertex,
        lane_id: i32,
        s: f64,
    ) -> LaneMultiStream {
        let element = graph.element(start);
        let dir = element.map_or(true, |e| e.in_road_direction);
        let lane = element
            .map(|e| self.lane_by_od_id(&e.road_id, lane_id, s))
            .filter(|lane| lane.exists());
        let start_offset = lane.map_or(0.0, |lane| {
            if dir {
                s - lane.road_start()
            } else {
                lane.road_end() - s
            }
        });
        let mut builder = MultiStreamBuilder::new(self, graph, start_offset);
        let root = builder.lane_node(start, lane.map(Lane::id), dir, 0.0);
        builder.finish("lane");
        let stream = MultiStream::new(root);
        #[cfg(feature = "debug")]
        crate::debug::debug_multi_stream("lane_multi_stream", &stream);
        stream
    }

    /// Builds the tree of roads reachable from a vertex of the road graph.
    pub fn create_road_multi_stream(&self, graph: &RoadGraph, start: RoadGraphVertex) -> RoadMultiStream {
        let mut builder = MultiStreamBuilder::new(self, graph, 0.0);
        let root = builder.road_node(start, 0.0);
        builder.finish("road");
        let stream = MultiStream::new(root);
        #[cfg(feature = "debug")]
        crate::debug::debug_multi_stream("road_multi_stream", &stream);
        stream
    }
}

/// Grows a multi-stream depth first, within the horizon and node limits.
struct MultiStreamBuilder<'a> {
    net: &'a RoadNetwork,
    graph: &'a RoadGraph,
    /// No children are added to nodes ending beyond this stream position.
    horizon: f64,
    /// The number of nodes that may still be created.
    budget: usize,
    /// Whether the node limit cut the tree short.
    truncated: bool,
}

impl<'a> MultiStreamBuilder<'a> {
    fn new(net: &'a RoadNetwork, graph: &'a RoadGraph, start_offset: f64) -> Self {
        Self {
            net,
            graph,
            horizon: start_offset + net.config.max_search_length,
            budget: net.config.max_multi_stream_nodes,
            truncated: false,
        }
    }

    fn finish(&self, kind: &str) {
        if self.truncated {
            log::warn!(
                "{} multi-stream truncated at {} nodes",
                kind,
                self.net.config.max_multi_stream_nodes
            );
        }
    }

    /// Returns true once the node limit has been reached.
    fn exhausted(&mut self) -> bool {
        if self.budget == 0 {
            self.truncated = true;
        }
        self.truncated
    }

    fn graph_direction(&self, vertex: RoadGraphVertex) -> bool {
        self.graph
            .element(vertex)
            .map_or(true, |e| e.in_road_direction)
    }

    fn lane_node(&mut self, vertex: RoadGraphVertex, lane: Option<LaneId>, dir: bool, start: f64) -> MultiStreamNode<LaneId> {
        self.budget = self.budget.saturating_sub(1);
        let element = lane.map(|id| {
            let lane = self.net.lane(id);
            StreamInfo::new(id, start, dir, lane.length(), lane.road_start())
        });
        let end = element.map_or(start, |e| e.end_s());
        let mut node = MultiStreamNode::new(vertex, element);
        if end >= self.horizon {
            return node;
        }
        for (child_vertex, child_lane, child_dir) in self.lane_successors(vertex, lane, dir) {
            if self.exhausted() {
                break;
            }
            let child = self.lane_node(child_vertex, child_lane, child_dir, end);
            node.next.push(child);
        }
        node
    }

    /// Resolves the children of a lane node as (vertex, lane, direction) triples.
    fn lane_successors(
        &self,
        vertex: RoadGraphVertex,
        lane: Option<LaneId>,
        dir: bool,
    ) -> Vec<(RoadGraphVertex, Option<LaneId>, bool)> {
        let edges = self.graph.successors(vertex);
        let Some(lane) = lane.map(|id| self.net.lane(id)) else {
            return edges
                .iter()
                .map(|v| (*v, None, self.graph_direction(*v)))
                .collect();
        };
        let candidates = lane.successors(dir);
        if let Some(next) = self.net.pick_lane_on_road(candidates, lane.road(), lane) {
            return vec![(vertex, Some(next), dir)];
        }
        edges
            .iter()
            .map(|v| {
                let next = self
                    .graph
                    .element(*v)
                    .and_then(|e| self.net.road_id(&e.road_id))
                    .and_then(|road| self.net.pick_lane_on_road(candidates, road, lane));
                (*v, next, self.graph_direction(*v))
            })
            .collect()
    }

    fn road_node(&mut self, vertex: RoadGraphVertex, start: f64) -> MultiStreamNode<RoadId> {
        self.budget = self.budget.saturating_sub(1);
        let element = self.graph.element(vertex).and_then(|e| {
            let road = self.net.road_by_od_id(&e.road_id)?;
            Some(StreamInfo::new(road.id(), start, e.in_road_direction, road.length(), 0.0))
        });
        let end = element.map_or(start, |e| e.end_s());
        let mut node = MultiStreamNode::new(vertex, element);
        if end >= self.horizon {
            return node;
        }
        for child_vertex in self.graph.successors(vertex).to_vec() {
            if self.exhausted() {
                break;
            }
            let child = self.road_node(child_vertex, end);
            node.next.push(child);
        }
        node
    }
}
