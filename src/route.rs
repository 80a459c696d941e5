//! Routes through the road network and the graph of possible routes.

use crate::{RoadLink, RoadNetwork};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

new_key_type! {
    /// Unique ID of a vertex in a [RoadGraph].
    pub struct RoadGraphVertex;
}

/// A road travelled in a given direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteElement {
    /// The human-readable road ID.
    pub road_id: String,
    /// Whether the road is travelled along its own coordinate.
    pub in_road_direction: bool,
}

impl RouteElement {
    pub fn new(road_id: &str, in_road_direction: bool) -> Self {
        Self {
            road_id: road_id.to_owned(),
            in_road_direction,
        }
    }
}

/// A single path through the road network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// The roads of the route, in driving order.
    pub roads: Vec<RouteElement>,
    /// The human-readable IDs of the junctions passed.
    pub junctions: Vec<String>,
}

impl Route {
    /// Creates a route from its roads.
    pub fn new(roads: Vec<RouteElement>) -> Self {
        Self {
            roads,
            junctions: vec![],
        }
    }

    /// Sets the junctions passed by the route.
    pub fn with_junctions(mut self, junctions: &[&str]) -> Self {
        self.junctions = junctions.iter().map(|j| j.to_string()).collect();
        self
    }
}

/// A directed graph of the roads that may be driven after one another.
///
/// Vertices are roads travelled in a given direction. The same
/// [RouteElement] may appear in several vertices when the graph is a tree.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    /// The road of each vertex.
    vertices: SlotMap<RoadGraphVertex, RouteElement>,
    /// The outgoing edges of each vertex, in insertion order.
    edges: HashMap<RoadGraphVertex, Vec<RoadGraphVertex>>,
    /// The first vertex added for each route element.
    lookup: HashMap<RouteElement, RoadGraphVertex>,
}

impl RoadGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a vertex for a road travelled in a given direction.
    pub fn add_vertex(&mut self, element: RouteElement) -> RoadGraphVertex {
        let vertex = self.vertices.insert(element.clone());
        self.lookup.entry(element).or_insert(vertex);
        vertex
    }

    /// Adds an edge from `from` to `to`.
    pub fn add_edge(&mut self, from: RoadGraphVertex, to: RoadGraphVertex) {
        self.edges.entry(from).or_default().push(to);
    }

    /// Gets the road of a vertex.
    pub fn element(&self, vertex: RoadGraphVertex) -> Option<&RouteElement> {
        self.vertices.get(vertex)
    }

    /// Finds the first vertex added for the given road and direction.
    pub fn vertex(&self, element: &RouteElement) -> Option<RoadGraphVertex> {
        self.lookup.get(element).copied()
    }

    /// Gets the vertices reachable from `vertex` over a single edge.
    pub fn successors(&self, vertex: RoadGraphVertex) -> &[RoadGraphVertex] {
        self.edges.get(&vertex).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Builds the graph of every road reachable from `start` within `max_depth` roads,
    /// following road and junction links. Each reached road gets its own vertex, so the
    /// graph is a tree rooted at the returned vertex.
    pub fn from_network(
        net: &RoadNetwork,
        start: RouteElement,
        max_depth: usize,
    ) -> (Self, RoadGraphVertex) {
        let mut graph = Self::new();
        let root = graph.add_vertex(start.clone());
        let mut frontier = vec![(root, start, 0)];
        while let Some((vertex, element, depth)) = frontier.pop() {
            if depth >= max_depth {
                continue;
            }
            for next in net.following_roads(&element) {
                let child = graph.add_vertex(next.clone());
                graph.add_edge(vertex, child);
                frontier.push((child, next, depth + 1));
            }
        }
        (graph, root)
    }

    /// Finds the shortest route, by road length, from `start` to any vertex of the road `target`.
    pub fn shortest_route(
        &self,
        net: &RoadNetwork,
        start: RoadGraphVertex,
        target: &str,
    ) -> Option<Route> {
        let length = |vertex: RoadGraphVertex| {
            self.element(vertex)
                .and_then(|e| net.road_by_od_id(&e.road_id))
                .map_or(0, |road| (road.length() * 1000.0) as u64)
        };
        let (path, _) = pathfinding::directed::dijkstra::dijkstra(
            &start,
            |vertex| {
                self.successors(*vertex)
                    .iter()
                    .map(|next| (*next, length(*next)))
                    .collect::<Vec<_>>()
            },
            |vertex| self.element(*vertex).map_or(false, |e| e.road_id == target),
        )?;
        let roads = path
            .iter()
            .filter_map(|vertex| self.element(*vertex).cloned())
            .collect::<Vec<_>>();
        let junctions = roads
            .iter()
            .filter_map(|e| net.road_by_od_id(&e.road_id)?.junction())
            .map(|j| net.junction(j).od_id().to_owned())
            .collect();
        Some(Route { roads, junctions })
    }
}

impl RoadNetwork {
    /// Gets the roads that may be driven directly after the given one.
    ///
    /// A road ending in a junction continues onto every connector leaving from it.
    pub fn following_roads(&self, element: &RouteElement) -> Vec<RouteElement> {
        let Some(road) = self.road_by_od_id(&element.road_id) else {
            return vec![];
        };
        let link = if element.in_road_direction {
            road.successor()
        } else {
            road.predecessor()
        };
        let entering = |other: crate::RoadId| {
            let other = self.road(other);
            // Driving onto a road at its start means driving along it.
            let along = other.predecessor() == RoadLink::Road(road.id())
                || road
                    .junction()
                    .map_or(false, |j| other.predecessor() == RoadLink::Junction(j));
            RouteElement::new(other.od_id(), along)
        };
        match link {
            RoadLink::Road(next) => vec![entering(next)],
            RoadLink::Junction(junction) => self
                .junction(junction)
                .connectors()
                .iter()
                .filter(|c| {
                    let connector = self.road(**c);
                    connector.predecessor() == RoadLink::Road(road.id())
                        || connector.successor() == RoadLink::Road(road.id())
                })
                .map(|c| {
                    let connector = self.road(*c);
                    RouteElement::new(
                        connector.od_id(),
                        connector.predecessor() == RoadLink::Road(road.id()),
                    )
                })
                .collect(),
            RoadLink::None => vec![],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vertex_lookup_keeps_first() {
        let mut graph = RoadGraph::new();
        let a = graph.add_vertex(RouteElement::new("A", true));
        let b = graph.add_vertex(RouteElement::new("B", false));
        let a2 = graph.add_vertex(RouteElement::new("A", true));
        graph.add_edge(a, b);
        graph.add_edge(b, a2);
        assert_eq!(graph.vertex(&RouteElement::new("A", true)), Some(a));
        assert_eq!(graph.vertex(&RouteElement::new("B", true)), None);
        assert_eq!(graph.successors(b), &[a2]);
        assert!(graph.successors(a2).is_empty());
    }
}
